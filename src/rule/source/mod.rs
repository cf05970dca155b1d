//! 规则源模块
//! 统一导出只读规则源 Trait 和两种实现（本地目录 / 内置规则包）

pub mod base_source;
pub mod fs_dir;
pub mod embedded;

pub use base_source::{RuleSource, RuleSourceKind};
pub use embedded::{BundledDocument, EmbeddedRuleSource};
pub use fs_dir::FsRuleSource;
