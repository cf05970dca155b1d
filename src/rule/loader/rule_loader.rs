use log::{debug, info, warn};
use serde::Serialize;

use crate::config::{PatchConfig, RuleOrigin};
use crate::error::I18nResult;
use crate::rule::core::RuleSet;
use crate::rule::source::{EmbeddedRuleSource, FsRuleSource, RuleSource, RuleSourceKind};

/// 单个文档/分类的加载问题（不中断加载）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadIssue {
    pub origin_path: String,
    pub message: String,
}

/// 加载结果
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub source_kind: RuleSourceKind,
    pub source: String,
    pub rule_sets: Vec<RuleSet>,
    pub issues: Vec<LoadIssue>,
}

/// 规则加载器（只读）
#[derive(Debug)]
pub struct RuleLoader {
    source: Box<dyn RuleSource>,
    extension: String,
}

impl RuleLoader {
    pub fn new(source: Box<dyn RuleSource>, extension: impl Into<String>) -> Self {
        Self {
            source,
            extension: extension.into(),
        }
    }

    /// 按配置选择规则源：外部目录存在且非空则优先，否则回退内置规则
    pub fn from_config(config: &PatchConfig) -> I18nResult<Self> {
        let source = Self::select_source(&config.origin)?;
        info!("使用{}: {}", source.kind(), source.describe());
        Ok(Self::new(source, config.options.document_extension.clone()))
    }

    pub fn select_source(origin: &RuleOrigin) -> I18nResult<Box<dyn RuleSource>> {
        let external = match origin {
            RuleOrigin::Embedded => None,
            RuleOrigin::LocalDir(dir) => Some(dir.clone()),
            RuleOrigin::Auto => PatchConfig::from_env().origin_dir(),
        };

        if let Some(dir) = external {
            if FsRuleSource::looks_populated(&dir) {
                return Ok(Box::new(FsRuleSource::new(dir)));
            }
            warn!("外部汉化配置目录不存在或为空: {}，回退内置规则", dir.display());
        }

        Ok(Box::new(EmbeddedRuleSource::bundled()?))
    }

    pub fn source(&self) -> &dyn RuleSource {
        self.source.as_ref()
    }

    /// 读取所有规则文档
    ///
    /// 只有规则根位置本身无法列出时返回错误；
    /// 单个分类或文档失败记录为 LoadIssue 并跳过
    pub fn load(&self) -> I18nResult<LoadReport> {
        let mut report = LoadReport {
            source_kind: self.source.kind(),
            source: self.source.describe(),
            rule_sets: Vec::new(),
            issues: Vec::new(),
        };

        for category in self.source.categories()? {
            let names = match self.source.documents(&category) {
                Ok(names) => names,
                Err(e) => {
                    let origin_path = format!("{}/{}", report.source, category);
                    warn!("警告: 读取分类目录失败 {}: {}", origin_path, e);
                    report.issues.push(LoadIssue { origin_path, message: e.to_string() });
                    continue;
                }
            };

            for name in names.into_iter().filter(|n| self.has_document_extension(n)) {
                let origin_path = self.source.origin_path(&category, &name);
                let parsed = self
                    .source
                    .read_document(&category, &name)
                    .and_then(|content| {
                        RuleSet::parse(&content, category.as_str(), name.as_str(), origin_path.as_str())
                    });

                match parsed {
                    Ok(rule_set) => report.rule_sets.push(rule_set),
                    Err(e) => {
                        warn!("警告: 跳过无效配置 {}: {}", origin_path, e);
                        report.issues.push(LoadIssue { origin_path, message: e.to_string() });
                    }
                }
            }
        }

        debug!(
            "规则加载完成：规则集 {} 个，跳过 {} 个",
            report.rule_sets.len(),
            report.issues.len()
        );
        Ok(report)
    }

    fn has_document_extension(&self, name: &str) -> bool {
        name.rsplit_once('.')
            .map(|(stem, ext)| !stem.is_empty() && ext == self.extension)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::source::BundledDocument;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write(root: &std::path::Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_malformed_document_does_not_abort_load() {
        let dir = tempdir().unwrap();
        write(dir.path(), "routes/home.json", r#"{"file":"src/home.tsx","replacements":{"Home":"首页"}}"#);
        write(dir.path(), "routes/broken.json", r#"{"file": "src/x.tsx", "replacements": {"#);
        write(dir.path(), "dialogs/model.json", r#"{"file":"src/model.tsx","replacements":{"Model":"模型"}}"#);
        write(dir.path(), "dialogs/notes.txt", "not a rule");
        write(dir.path(), "top-level.json", r#"{"file":"ignored.tsx","replacements":{"a":"b"}}"#);

        let loader = RuleLoader::new(Box::new(FsRuleSource::new(dir.path())), "json");
        let report = loader.load().unwrap();

        assert_eq!(report.source_kind, RuleSourceKind::Filesystem);
        assert_eq!(report.rule_sets.len(), 2);
        assert_eq!(report.issues.len(), 1);
        assert!(report.issues[0].origin_path.ends_with("broken.json"));

        let model = &report.rule_sets[0];
        assert_eq!(model.category, "dialogs");
        assert_eq!(model.source_name, "model.json");
        assert!(model.origin_path.ends_with("model.json"));
    }

    #[test]
    fn test_loads_from_embedded_source() {
        let source = EmbeddedRuleSource::from_documents(vec![BundledDocument {
            category: "routes".into(),
            name: "home.json".into(),
            content: r#"{"file":"src/home.tsx","replacements":{"Home":"首页"}}"#.into(),
        }]);
        let report = RuleLoader::new(Box::new(source), "json").load().unwrap();

        assert_eq!(report.source_kind, RuleSourceKind::Embedded);
        assert_eq!(report.rule_sets[0].origin_path, "assets/i18n/routes/home.json");
    }

    #[test]
    fn test_select_prefers_populated_dir() {
        let dir = tempdir().unwrap();
        write(dir.path(), "routes/home.json", "{}");

        let source = RuleLoader::select_source(&RuleOrigin::LocalDir(dir.path().to_path_buf())).unwrap();
        assert_eq!(source.kind(), RuleSourceKind::Filesystem);
    }

    #[test]
    fn test_select_falls_back_to_embedded() {
        let dir = tempdir().unwrap();
        let empty = RuleLoader::select_source(&RuleOrigin::LocalDir(dir.path().to_path_buf())).unwrap();
        assert_eq!(empty.kind(), RuleSourceKind::Embedded);

        let missing = RuleLoader::select_source(&RuleOrigin::LocalDir(PathBuf::from("/nonexistent/i18n"))).unwrap();
        assert_eq!(missing.kind(), RuleSourceKind::Embedded);
    }

    #[test]
    fn test_extension_filter() {
        let loader = RuleLoader::new(Box::new(EmbeddedRuleSource::from_documents(Vec::new())), "json");
        assert!(loader.has_document_extension("home.json"));
        assert!(!loader.has_document_extension("home.json.bak"));
        assert!(!loader.has_document_extension(".json"));
        assert!(!loader.has_document_extension("json"));
    }
}
