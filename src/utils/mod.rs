//! 通用工具模块
pub mod placeholder;
pub mod text;
pub mod bilingual;

pub use placeholder::{PlaceholderExtractor, PlaceholderSet};
pub use text::{normalize_newlines, truncate};
pub use bilingual::BilingualConverter;
