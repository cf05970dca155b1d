//! 覆盖率统计：候选源码文件中有多少被规则集引用

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;
use walkdir::WalkDir;

use crate::config::PatchOptions;
use crate::rule::core::RuleSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSnapshot {
    /// 扫描目录下的候选文件数
    pub candidate_files: usize,
    /// 落在扫描目录下的不同目标文件数
    pub referenced_files: usize,
    /// 覆盖率百分比；候选文件数为 0 时无意义，为 None
    pub percentage: Option<f64>,
    /// 未被任何规则集引用的候选文件（相对扫描目录，已排序）
    pub uncovered: Vec<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct CoverageReporter {
    options: PatchOptions,
}

impl CoverageReporter {
    pub fn new(options: PatchOptions) -> Self {
        Self { options }
    }

    /// `scan_root` 为扫描目录，`source_root` 为解析规则集目标路径所用的应用源码根目录
    ///
    /// 无法访问的子目录或条目记录警告后跳过，不影响其余统计
    pub fn coverage(
        &self,
        source_root: &Path,
        scan_root: &Path,
        candidate_extensions: &[String],
        rule_sets: &[RuleSet],
    ) -> CoverageSnapshot {
        let candidates = Self::collect_candidates(scan_root, candidate_extensions);

        let referenced: BTreeSet<PathBuf> = rule_sets
            .iter()
            .filter(|rs| !rs.target_file.trim().is_empty())
            .map(|rs| rs.resolve_target(source_root, &self.options))
            .filter_map(|path| path.strip_prefix(scan_root).ok().map(Path::to_path_buf))
            .collect();

        let uncovered: Vec<PathBuf> = candidates
            .iter()
            .filter(|path| !referenced.contains(*path))
            .cloned()
            .collect();

        let percentage = if candidates.is_empty() {
            None
        } else {
            Some(referenced.len() as f64 / candidates.len() as f64 * 100.0)
        };

        debug!(
            "覆盖率统计：候选 {} 个，已引用 {} 个",
            candidates.len(),
            referenced.len()
        );

        CoverageSnapshot {
            candidate_files: candidates.len(),
            referenced_files: referenced.len(),
            percentage,
            uncovered,
        }
    }

    /// 使用配置中的扫描目录与候选扩展名
    pub fn coverage_with_defaults(&self, source_root: &Path, rule_sets: &[RuleSet]) -> CoverageSnapshot {
        let scan_root = source_root.join(&self.options.coverage_dir);
        self.coverage(source_root, &scan_root, &self.options.candidate_extensions, rule_sets)
    }

    /// 递归收集候选文件（相对扫描目录）；扫描目录不存在时视为空
    fn collect_candidates(scan_root: &Path, extensions: &[String]) -> BTreeSet<PathBuf> {
        let mut files = BTreeSet::new();
        if !scan_root.is_dir() {
            warn!("源码目录不存在，跳过覆盖率扫描: {}", scan_root.display());
            return files;
        }

        for entry in WalkDir::new(scan_root) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("警告: 跳过无法访问的路径: {}", e);
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            let matches_ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| extensions.iter().any(|want| want == e))
                .unwrap_or(false);
            if matches_ext {
                if let Ok(rel) = entry.path().strip_prefix(scan_root) {
                    files.insert(rel.to_path_buf());
                }
            }
        }
        files
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    fn rule_set(target: &str) -> RuleSet {
        RuleSet::parse(
            &format!(r#"{{"file":"{}","replacements":{{"A":"甲"}}}}"#, target),
            "c",
            "x.json",
            "c/x.json",
        )
        .unwrap()
    }

    fn exts() -> Vec<String> {
        vec!["tsx".into(), "jsx".into()]
    }

    #[test]
    fn test_coverage_ratio() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "packages/opencode/src/a.tsx");
        touch(dir.path(), "packages/opencode/src/ui/b.tsx");
        touch(dir.path(), "packages/opencode/src/ui/c.jsx");
        touch(dir.path(), "packages/opencode/src/ui/d.ts");

        let sets = vec![
            rule_set("src/a.tsx"),
            rule_set("src/a.tsx"),
            rule_set("packages/opencode/src/ui/b.tsx"),
            rule_set("../other/outside.tsx"),
        ];

        let reporter = CoverageReporter::default();
        let snapshot = reporter.coverage_with_defaults(dir.path(), &sets);

        assert_eq!(snapshot.candidate_files, 3);
        assert_eq!(snapshot.referenced_files, 2);
        let pct = snapshot.percentage.unwrap();
        assert!((pct - 66.666).abs() < 0.01);
        assert_eq!(snapshot.uncovered, vec![PathBuf::from("ui/c.jsx")]);
    }

    #[test]
    fn test_zero_candidates_is_undefined() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "packages/opencode/src/readme.md");

        let snapshot = CoverageReporter::default()
            .coverage_with_defaults(dir.path(), &[rule_set("src/a.tsx")]);
        assert_eq!(snapshot.candidate_files, 0);
        assert_eq!(snapshot.percentage, None);
    }

    #[test]
    fn test_missing_scan_root_is_empty() {
        let dir = tempdir().unwrap();
        let snapshot = CoverageReporter::default()
            .coverage(dir.path(), &dir.path().join("absent"), &exts(), &[]);
        assert_eq!(snapshot.candidate_files, 0);
        assert_eq!(snapshot.percentage, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subtree_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        touch(dir.path(), "packages/opencode/src/a.tsx");
        touch(dir.path(), "packages/opencode/src/locked/b.tsx");
        let locked = dir.path().join("packages/opencode/src/locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // root 用户不受目录权限限制，此时无法构造遍历错误
        let readable = fs::read_dir(&locked).is_ok();
        let snapshot = CoverageReporter::default().coverage_with_defaults(dir.path(), &[rule_set("src/a.tsx")]);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        if readable {
            assert_eq!(snapshot.candidate_files, 2);
            return;
        }
        assert_eq!(snapshot.candidate_files, 1);
        assert_eq!(snapshot.referenced_files, 1);
        assert_eq!(snapshot.percentage, Some(100.0));
    }
}
