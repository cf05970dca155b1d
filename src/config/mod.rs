//! 配置模块
pub mod rule;

pub use rule::{CustomConfigBuilder, PatchConfig, PatchOptions, RuleOrigin};
