use std::fs;
use std::path::{Path, PathBuf};

use super::base_source::{RuleSource, RuleSourceKind};
use crate::error::{I18nError, I18nResult};

/// 本地规则目录
#[derive(Debug, Clone)]
pub struct FsRuleSource {
    root: PathBuf,
}

impl FsRuleSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 目录存在且至少包含一个条目
    pub fn looks_populated(path: &Path) -> bool {
        fs::read_dir(path)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false)
    }

    fn list(dir: &Path, want_dirs: bool) -> I18nResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // 跟随符号链接判断类型
            let is_dir = entry.path().is_dir();
            if is_dir == want_dirs {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

impl RuleSource for FsRuleSource {
    fn kind(&self) -> RuleSourceKind {
        RuleSourceKind::Filesystem
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn categories(&self) -> I18nResult<Vec<String>> {
        if !self.root.is_dir() {
            return Err(I18nError::RuleLoadError(format!(
                "汉化配置目录不存在: {}",
                self.root.display()
            )));
        }
        Self::list(&self.root, true)
    }

    fn documents(&self, category: &str) -> I18nResult<Vec<String>> {
        Self::list(&self.root.join(category), false)
    }

    fn origin_path(&self, category: &str, name: &str) -> String {
        self.root.join(category).join(name).display().to_string()
    }

    fn read_document(&self, category: &str, name: &str) -> I18nResult<String> {
        Ok(fs::read_to_string(self.root.join(category).join(name))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lists_categories_and_documents() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("routes")).unwrap();
        fs::create_dir_all(dir.path().join("dialogs")).unwrap();
        fs::write(dir.path().join("routes/home.json"), "{}").unwrap();
        fs::write(dir.path().join("routes/README.md"), "notes").unwrap();
        fs::write(dir.path().join("stray.json"), "{}").unwrap();

        let source = FsRuleSource::new(dir.path());
        assert_eq!(source.categories().unwrap(), vec!["dialogs", "routes"]);
        assert_eq!(source.documents("routes").unwrap(), vec!["README.md", "home.json"]);
        assert_eq!(source.read_document("routes", "home.json").unwrap(), "{}");
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempdir().unwrap();
        let source = FsRuleSource::new(dir.path().join("absent"));
        assert!(source.categories().is_err());
        assert!(!FsRuleSource::looks_populated(source.root()));
    }

    #[test]
    fn test_looks_populated() {
        let dir = tempdir().unwrap();
        assert!(!FsRuleSource::looks_populated(dir.path()));
        fs::create_dir(dir.path().join("routes")).unwrap();
        assert!(FsRuleSource::looks_populated(dir.path()));
    }
}
