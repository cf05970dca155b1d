//! 规则模块：负责规则集的数据模型、规则源与加载
pub mod core;
pub mod source;
pub mod loader;

// 统一导出核心公共接口
pub use self::core::{
    ApplyOutcome, ApplyReport, ApplyTotals, CategoryStats, RuleDocument, RuleSet, RuleStats,
    SkipReason,
};
pub use self::loader::{LoadIssue, LoadReport, RuleLoader};
pub use self::source::{EmbeddedRuleSource, FsRuleSource, RuleSource, RuleSourceKind};
