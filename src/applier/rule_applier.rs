use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::{debug, info, warn};

use super::matcher::FindPattern;
use crate::config::PatchOptions;
use crate::rule::core::{ApplyOutcome, ApplyReport, RuleSet, SkipReason};
use crate::utils::normalize_newlines;

/// 内存中的改写结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteResult {
    pub content: String,
    /// 命中的 find 串（按规则遍历顺序）
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
}

/// 规则应用器
///
/// 规则集逐个串行处理；同一规则集内按 find 键字典序依次替换，
/// 不检测规则之间的相互影响（前一条的译文可能被后一条再次命中）
#[derive(Debug, Clone, Default)]
pub struct RuleApplier {
    options: PatchOptions,
}

impl RuleApplier {
    pub fn new(options: PatchOptions) -> Self {
        Self { options }
    }

    /// 对已规范化的内容依次执行全部规则
    ///
    /// 模拟运行与实际运行共用此过程，保证两者的命中统计一致
    pub fn rewrite(replacements: &BTreeMap<String, String>, content: &str) -> RewriteResult {
        let mut current = content.to_string();
        let mut matched = Vec::new();
        let mut unmatched = Vec::new();

        for (find, replace) in replacements {
            let pattern = match FindPattern::compile(find) {
                Ok(p) => p,
                Err(e) => {
                    warn!("查找串编译失败 {:?}: {}", find, e);
                    unmatched.push(find.clone());
                    continue;
                }
            };

            if pattern.is_match(&current) {
                current = pattern.replace_all(&current, replace).into_owned();
                matched.push(find.clone());
            } else {
                unmatched.push(find.clone());
            }
        }

        RewriteResult {
            content: current,
            matched,
            unmatched,
        }
    }

    /// 将单个规则集应用到源码目录中的目标文件
    pub fn apply(&self, rule_set: &RuleSet, source_root: &Path, dry_run: bool) -> ApplyOutcome {
        let resolved = (!rule_set.target_file.trim().is_empty())
            .then(|| rule_set.resolve_target(source_root, &self.options));
        let mut outcome = ApplyOutcome::new(rule_set.identity(), rule_set.target_file.clone(), resolved.clone());
        outcome.total = rule_set.replacements.len();

        let target_path = match resolved {
            Some(path) if !rule_set.is_inert() => path,
            _ => return outcome.skipped(SkipReason::MissingFields),
        };

        if !target_path.exists() {
            debug!("目标文件不存在，跳过: {}", target_path.display());
            return outcome.skipped(SkipReason::TargetMissing);
        }

        let raw = match fs::read_to_string(&target_path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("读取文件失败 {}: {}", target_path.display(), e);
                return outcome.skipped(SkipReason::ReadFailure(e.to_string()));
            }
        };
        let original = normalize_newlines(&raw);

        let result = Self::rewrite(&rule_set.replacements, &original);
        outcome.succeeded = result.matched.len();
        outcome.failed = result.unmatched.len();
        outcome.unmatched = result.unmatched;
        outcome.success = outcome.succeeded > 0;

        if !dry_run && result.content != original {
            match fs::write(&target_path, &result.content) {
                Ok(()) => {
                    outcome.written = true;
                    info!("✓ {} ({} 处替换)", rule_set.target_file, outcome.succeeded);
                }
                Err(e) => {
                    warn!("错误: 写入文件失败 {}: {}", target_path.display(), e);
                    outcome.success = false;
                    outcome.write_error = Some(e.to_string());
                }
            }
        }

        outcome
    }

    /// 依次应用全部规则集；任何单个失败都不影响其余规则集
    pub fn apply_all(&self, rule_sets: &[RuleSet], source_root: &Path, dry_run: bool) -> ApplyReport {
        let mut report = ApplyReport {
            dry_run,
            ..ApplyReport::default()
        };
        for rule_set in rule_sets {
            report.push(self.apply(rule_set, source_root, dry_run));
        }

        let totals = &report.totals;
        debug!(
            "应用完成{}：处理 {} 个，写入 {} 个，跳过 {} 个，命中 {} 条，未命中 {} 条",
            if dry_run { "（模拟）" } else { "" },
            totals.processed,
            totals.written,
            totals.skipped,
            totals.rules_matched,
            totals.rules_missed
        );
        report
    }
}
