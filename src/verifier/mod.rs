//! 规则校验模块：占位符保护与结构完整性检查，只读不写
pub mod rule_verifier;

pub use rule_verifier::{RuleVerifier, StructuralIssue, StructuralIssueKind, Violation};
