//! 规则集数据模型定义
//! 一个规则文档对应一个目标文件，仅存储数据，不含匹配逻辑

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::PatchOptions;
use crate::error::{I18nError, I18nResult};

/// 规则文档（磁盘/内置包中的原始 JSON 结构）
///
/// `replacements` 使用 BTreeMap：重复键按 JSON 出现顺序后者覆盖前者，
/// 遍历顺序为 find 键的字典序
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replacements: Option<BTreeMap<String, String>>,
}

impl RuleDocument {
    pub fn parse_str(content: &str) -> I18nResult<Self> {
        serde_json::from_str(content).map_err(I18nError::from)
    }

    /// 两空格缩进 + 末尾换行，与手写规则文件风格一致
    pub fn to_pretty_json(&self) -> I18nResult<String> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }
}

/// 已加载的规则集（文档 + 来源元数据）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSet {
    /// 所在分类目录名
    pub category: String,
    /// 文档文件名
    pub source_name: String,
    /// 文档完整路径或内置资源路径
    pub origin_path: String,
    /// 目标文件（相对应用源码根目录）
    pub target_file: String,
    /// find → replace
    pub replacements: BTreeMap<String, String>,
}

impl RuleSet {
    /// 解析文档并附加来源元数据
    pub fn parse(
        content: &str,
        category: impl Into<String>,
        source_name: impl Into<String>,
        origin_path: impl Into<String>,
    ) -> I18nResult<Self> {
        let document = RuleDocument::parse_str(content)?;
        Ok(Self::from_document(document, category, source_name, origin_path))
    }

    pub fn from_document(
        document: RuleDocument,
        category: impl Into<String>,
        source_name: impl Into<String>,
        origin_path: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            source_name: source_name.into(),
            origin_path: origin_path.into(),
            target_file: document.file.unwrap_or_default(),
            replacements: document.replacements.unwrap_or_default(),
        }
    }

    /// 转回文档结构（用于回写）
    ///
    /// 原文档缺少的 file 不会以空串写回；replacements 按 find 键字典序输出
    pub fn to_document(&self) -> RuleDocument {
        RuleDocument {
            file: (!self.target_file.is_empty()).then(|| self.target_file.clone()),
            replacements: Some(self.replacements.clone()),
        }
    }

    /// 缺少目标文件或替换规则的规则集不可应用，只能被跳过
    pub fn is_inert(&self) -> bool {
        self.target_file.trim().is_empty() || self.replacements.is_empty()
    }

    /// 诊断用标识：分类/文件名
    pub fn identity(&self) -> String {
        format!("{}/{}", self.category, self.source_name)
    }

    /// 目标文件相对源码根目录的路径
    ///
    /// 已以 `packages/` 开头的路径原样使用，否则补全到应用包目录下。
    /// 只保留普通路径段，绝对路径与 `..` 不会越出源码根目录
    pub fn relative_target(&self, options: &PatchOptions) -> PathBuf {
        let normalized = self.target_file.replace('\\', "/");
        let base = if normalized.starts_with(&options.rooted_prefix) {
            PathBuf::new()
        } else {
            options.app_prefix.clone()
        };
        join_normal_components(base, Path::new(&normalized))
    }

    /// 目标文件的绝对路径
    pub fn resolve_target(&self, source_root: &Path, options: &PatchOptions) -> PathBuf {
        source_root.join(self.relative_target(options))
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.identity(), self.target_file)
    }
}

fn join_normal_components(mut base: PathBuf, relative: &Path) -> PathBuf {
    for component in relative.components() {
        if let Component::Normal(part) = component {
            base.push(part);
        }
    }
    base
}
