//! opencode-i18n - OpenCode 源码汉化规则引擎
//!
//! 从 分类目录/规则文档 两级结构加载规则集（外部目录优先，否则使用内置规则），
//! 校验占位符保护，按单词边界或子串策略将替换应用到目标源码，并统计覆盖率。
//! 库本身不打印、不交互，全部结果以结构化数据返回。

pub mod config;
pub mod error;
pub mod rule;
pub mod utils;
pub mod verifier;
pub mod applier;
pub mod coverage;
pub mod patcher;

// 导出全局错误类型
pub use self::error::{I18nError, I18nResult};

// 导出配置模块核心结构体与构建器
pub use self::config::{CustomConfigBuilder, PatchConfig, PatchOptions, RuleOrigin};

// 导出规则模块核心接口与数据结构
pub use self::rule::{
    ApplyOutcome, ApplyReport, ApplyTotals, CategoryStats, EmbeddedRuleSource, FsRuleSource,
    LoadIssue, LoadReport, RuleDocument, RuleLoader, RuleSet, RuleSource, RuleSourceKind,
    RuleStats, SkipReason,
};

// 导出校验、应用、覆盖率组件
pub use self::verifier::{RuleVerifier, StructuralIssue, StructuralIssueKind, Violation};
pub use self::applier::{FindPattern, MatchStrategy, RuleApplier};
pub use self::coverage::{CoverageReporter, CoverageSnapshot};
pub use self::patcher::I18nPatcher;

// 导出通用工具
pub use self::utils::{BilingualConverter, PlaceholderExtractor, PlaceholderSet};
