//! 规则应用模块：按单词边界/子串两种策略匹配并替换目标文件内容
pub mod matcher;
pub mod rule_applier;

pub use matcher::{FindPattern, MatchStrategy};
pub use rule_applier::{RewriteResult, RuleApplier};
