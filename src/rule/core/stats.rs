//! 规则统计

use std::collections::BTreeMap;

use serde::Serialize;

use super::rule_set::RuleSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub sets: usize,
    pub replacements: usize,
}

/// 规则集统计（按分类名排序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleStats {
    pub total_sets: usize,
    pub total_replacements: usize,
    pub categories: BTreeMap<String, CategoryStats>,
}

impl RuleStats {
    pub fn collect(rule_sets: &[RuleSet]) -> Self {
        let mut stats = Self::default();
        for rule_set in rule_sets {
            let count = rule_set.replacements.len();
            stats.total_sets += 1;
            stats.total_replacements += count;

            let entry = stats.categories.entry(rule_set.category.clone()).or_default();
            entry.sets += 1;
            entry.replacements += count;
        }
        stats
    }
}
