//! 规则加载模块
pub mod rule_loader;

pub use rule_loader::{LoadIssue, LoadReport, RuleLoader};
