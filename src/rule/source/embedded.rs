//! 内置规则包
//! build.rs 将 assets/i18n 打包（JSON + 可选 LZ4），此处懒加载解包为只读规则源

use std::collections::BTreeMap;
use std::sync::Arc;

use lz4_flex::decompress_size_prepended;
use serde::{Deserialize, Serialize};

use super::base_source::{RuleSource, RuleSourceKind};
use crate::error::{I18nError, I18nResult};

/// 内置资源路径前缀（诊断用）
pub const EMBEDDED_ROOT: &str = "assets/i18n";

/// 打包条目，字段须与 build.rs 保持一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundledDocument {
    pub category: String,
    pub name: String,
    pub content: String,
}

/// 解包：可选 LZ4 解压 + JSON 反序列化
pub fn decode_bundle(bytes: &[u8], compressed: bool) -> I18nResult<Vec<BundledDocument>> {
    let raw;
    let json = if compressed {
        raw = decompress_size_prepended(bytes).map_err(|e| {
            I18nError::BundleError(format!("LZ4解压缩规则包失败: {:?}, 压缩包字节长度: {}", e, bytes.len()))
        })?;
        raw.as_slice()
    } else {
        bytes
    };
    serde_json::from_slice(json)
        .map_err(|e| I18nError::BundleError(format!("规则包反序列化失败: {}", e)))
}

#[cfg(feature = "embedded-rules")]
mod bundle {
    use super::{decode_bundle, BundledDocument};
    use once_cell::sync::Lazy;
    use std::sync::Arc;

    // 文件名由 build_config.json 配置，build.rs 注入环境变量
    static RULE_BUNDLE: &[u8] =
        include_bytes!(concat!(env!("OUT_DIR"), "/", env!("RULE_BUNDLE_FILENAME")));

    /// 首次访问时解包，进程内仅一份
    pub(super) static EMBEDDED_DOCUMENTS: Lazy<Result<Arc<Vec<BundledDocument>>, String>> =
        Lazy::new(|| {
            let compressed = env!("RULE_BUNDLE_COMPRESSED") == "1";
            decode_bundle(RULE_BUNDLE, compressed)
                .map(Arc::new)
                .map_err(|e| e.to_string())
        });
}

/// 内置只读规则源
#[derive(Debug, Clone)]
pub struct EmbeddedRuleSource {
    // category -> name -> index
    index: BTreeMap<String, BTreeMap<String, usize>>,
    documents: Arc<Vec<BundledDocument>>,
}

impl EmbeddedRuleSource {
    /// 编译期固化的规则包；未开启 embedded-rules 特性时为空
    pub fn bundled() -> I18nResult<Self> {
        #[cfg(feature = "embedded-rules")]
        {
            match &*bundle::EMBEDDED_DOCUMENTS {
                Ok(docs) => Ok(Self::from_shared(Arc::clone(docs))),
                Err(e) => Err(I18nError::BundleError(e.clone())),
            }
        }
        #[cfg(not(feature = "embedded-rules"))]
        {
            log::debug!("embedded-rules 特性未启用，内置规则为空");
            Ok(Self::from_documents(Vec::new()))
        }
    }

    pub fn from_documents(documents: Vec<BundledDocument>) -> Self {
        Self::from_shared(Arc::new(documents))
    }

    fn from_shared(documents: Arc<Vec<BundledDocument>>) -> Self {
        let mut index: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
        for (i, doc) in documents.iter().enumerate() {
            index
                .entry(doc.category.clone())
                .or_default()
                .insert(doc.name.clone(), i);
        }
        Self { index, documents }
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl RuleSource for EmbeddedRuleSource {
    fn kind(&self) -> RuleSourceKind {
        RuleSourceKind::Embedded
    }

    fn describe(&self) -> String {
        EMBEDDED_ROOT.to_string()
    }

    fn categories(&self) -> I18nResult<Vec<String>> {
        Ok(self.index.keys().cloned().collect())
    }

    fn documents(&self, category: &str) -> I18nResult<Vec<String>> {
        self.index
            .get(category)
            .map(|names| names.keys().cloned().collect())
            .ok_or_else(|| I18nError::RuleLoadError(format!("内置规则分类不存在: {}", category)))
    }

    fn origin_path(&self, category: &str, name: &str) -> String {
        // 内置资源路径统一使用正斜杠
        format!("{}/{}/{}", EMBEDDED_ROOT, category, name)
    }

    fn read_document(&self, category: &str, name: &str) -> I18nResult<String> {
        self.index
            .get(category)
            .and_then(|names| names.get(name))
            .map(|&i| self.documents[i].content.clone())
            .ok_or_else(|| {
                I18nError::RuleLoadError(format!("内置规则文档不存在: {}", self.origin_path(category, name)))
            })
    }
}
