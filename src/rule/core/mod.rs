//! 规则核心数据结构
pub mod rule_set;
pub mod outcome;
pub mod stats;

pub use rule_set::{RuleDocument, RuleSet};
pub use outcome::{ApplyOutcome, ApplyReport, ApplyTotals, SkipReason};
pub use stats::{CategoryStats, RuleStats};
