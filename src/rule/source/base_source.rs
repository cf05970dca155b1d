//! 通用只读规则源 Trait
//! 规则源按 分类目录 → 规则文档 两级组织，加载器只依赖此抽象

use std::fmt;

use serde::Serialize;

use crate::error::I18nResult;

/// 规则源类型（仅用于诊断输出，不影响加载行为）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuleSourceKind {
    /// 外部规则目录
    Filesystem,
    /// 编译期内置规则包
    Embedded,
}

impl fmt::Display for RuleSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleSourceKind::Filesystem => write!(f, "外部规则目录"),
            RuleSourceKind::Embedded => write!(f, "内置规则"),
        }
    }
}

pub trait RuleSource: fmt::Debug + Send + Sync {
    fn kind(&self) -> RuleSourceKind;

    /// 规则根位置描述（目录路径或内置资源路径）
    fn describe(&self) -> String;

    /// 一级分类名（已排序）；根位置本身无法列出时返回错误
    fn categories(&self) -> I18nResult<Vec<String>>;

    /// 分类下的所有文件名（已排序，不过滤扩展名）
    fn documents(&self, category: &str) -> I18nResult<Vec<String>>;

    /// 文档的完整路径或资源路径
    fn origin_path(&self, category: &str, name: &str) -> String;

    fn read_document(&self, category: &str, name: &str) -> I18nResult<String>;
}
