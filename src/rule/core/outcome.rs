//! 规则应用结果定义

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// 跳过原因（固定分类）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// 缺少 file 或 replacements 字段
    MissingFields,
    /// 目标文件不存在
    TargetMissing,
    /// 目标文件存在但读取失败
    ReadFailure(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingFields => write!(f, "缺少 file 或 replacements 字段"),
            SkipReason::TargetMissing => write!(f, "目标文件不存在"),
            SkipReason::ReadFailure(e) => write!(f, "读取文件失败: {}", e),
        }
    }
}

/// 单个规则集的应用结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyOutcome {
    /// 规则集标识（分类/文件名）
    pub rule_set: String,
    /// 规则集中声明的目标文件
    pub target_file: String,
    /// 解析后的目标路径；缺少 file 字段时为 None
    pub resolved_path: Option<PathBuf>,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// 至少一条规则匹配且未发生写入失败
    pub success: bool,
    /// 内容发生变化并成功写回
    pub written: bool,
    pub skip: Option<SkipReason>,
    pub write_error: Option<String>,
    /// 未匹配的 find 串（按规则遍历顺序）
    pub unmatched: Vec<String>,
}

impl ApplyOutcome {
    pub(crate) fn new(rule_set: String, target_file: String, resolved_path: Option<PathBuf>) -> Self {
        Self {
            rule_set,
            target_file,
            resolved_path,
            total: 0,
            succeeded: 0,
            failed: 0,
            success: false,
            written: false,
            skip: None,
            write_error: None,
            unmatched: Vec::new(),
        }
    }

    pub(crate) fn skipped(mut self, reason: SkipReason) -> Self {
        self.skip = Some(reason);
        self
    }

    pub fn is_skipped(&self) -> bool {
        self.skip.is_some()
    }
}

/// 批量应用汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyTotals {
    /// 实际参与匹配的规则集数（未跳过）
    pub processed: usize,
    pub skipped: usize,
    pub written: usize,
    pub write_failures: usize,
    pub rules_matched: usize,
    pub rules_missed: usize,
}

/// 批量应用报告
#[derive(Debug, Clone, Default, Serialize)]
pub struct ApplyReport {
    pub dry_run: bool,
    pub outcomes: Vec<ApplyOutcome>,
    pub totals: ApplyTotals,
}

impl ApplyReport {
    pub(crate) fn push(&mut self, outcome: ApplyOutcome) {
        let totals = &mut self.totals;
        if outcome.is_skipped() {
            totals.skipped += 1;
        } else {
            totals.processed += 1;
            totals.rules_matched += outcome.succeeded;
            totals.rules_missed += outcome.failed;
        }
        if outcome.written {
            totals.written += 1;
        }
        if outcome.write_error.is_some() {
            totals.write_failures += 1;
        }
        self.outcomes.push(outcome);
    }

    /// 匹配率（百分比），无参与规则时为 None
    pub fn match_rate(&self) -> Option<f64> {
        let total = self.totals.rules_matched + self.totals.rules_missed;
        if total == 0 {
            None
        } else {
            Some(self.totals.rules_matched as f64 / total as f64 * 100.0)
        }
    }
}
