use std::fmt;

use log::debug;
use serde::Serialize;

use crate::rule::core::RuleSet;
use crate::utils::{truncate, PlaceholderExtractor};

/// 占位符保护问题：替换前后变量多重集不一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// 规则集标识（分类/文件名）
    pub rule_set: String,
    /// 原文（已截断）
    pub find: String,
    /// 译文（已截断）
    pub replace: String,
    /// 原文中有、译文中缺失的变量
    pub missing: Vec<String>,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: \"{}\" -> \"{}\" 缺失变量: [{}]",
            self.rule_set,
            self.find,
            self.replace,
            self.missing.join(", ")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StructuralIssueKind {
    MissingFile,
    MissingReplacements,
}

/// 结构问题：缺少 file 或 replacements（此类规则集在应用时被跳过）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralIssue {
    pub rule_set: String,
    pub kind: StructuralIssueKind,
}

impl fmt::Display for StructuralIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            StructuralIssueKind::MissingFile => write!(f, "{}: 缺少 file 字段", self.rule_set),
            StructuralIssueKind::MissingReplacements => write!(f, "{}: 缺少 replacements", self.rule_set),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RuleVerifier {
    truncate_width: usize,
}

impl Default for RuleVerifier {
    fn default() -> Self {
        Self { truncate_width: 50 }
    }
}

impl RuleVerifier {
    pub fn new(truncate_width: usize) -> Self {
        Self { truncate_width }
    }

    /// 逐条比较 find/replace 的占位符多重集
    pub fn verify(&self, rule_set: &RuleSet) -> Vec<Violation> {
        let mut violations = Vec::new();
        for (find, replace) in &rule_set.replacements {
            let expected = PlaceholderExtractor::extract(find);
            let actual = PlaceholderExtractor::extract(replace);
            if expected == actual {
                continue;
            }

            violations.push(Violation {
                rule_set: rule_set.identity(),
                find: truncate(find, self.truncate_width).into_owned(),
                replace: truncate(replace, self.truncate_width).into_owned(),
                missing: expected.missing_from(&actual),
            });
        }
        violations
    }

    pub fn verify_all(&self, rule_sets: &[RuleSet]) -> Vec<Violation> {
        let violations: Vec<Violation> = rule_sets.iter().flat_map(|rs| self.verify(rs)).collect();
        debug!("变量保护检查完成：{} 个规则集，{} 处问题", rule_sets.len(), violations.len());
        violations
    }

    pub fn check_structure(&self, rule_sets: &[RuleSet]) -> Vec<StructuralIssue> {
        let mut issues = Vec::new();
        for rule_set in rule_sets {
            if rule_set.target_file.trim().is_empty() {
                issues.push(StructuralIssue {
                    rule_set: rule_set.identity(),
                    kind: StructuralIssueKind::MissingFile,
                });
            }
            if rule_set.replacements.is_empty() {
                issues.push(StructuralIssue {
                    rule_set: rule_set.identity(),
                    kind: StructuralIssueKind::MissingReplacements,
                });
            }
        }
        issues
    }
}
