//! 双语格式转换：`"English": "中文"` → `"English": "中文 (English)"`
//! 纯内存变换，不读写文件

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rule::core::RuleSet;

/// 译文末尾已带有 `(English text)` 形式的后缀
static BILINGUAL_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([A-Z][^)]+\)\s*$").unwrap());
/// 拆出译文主体与括号后缀
static STRIP_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.+?)\s*\([^)]+\)\s*$").unwrap());

/// 原文超过此长度不追加后缀
pub const DEFAULT_MAX_ORIGINAL_LEN: usize = 80;

/// 默认保持纯中文的原文（内容会被动态拼接，追加后缀会产生嵌套）
pub const DEFAULT_PURE_KEYS: [&str; 3] = [
    "Fix a TODO in the codebase",
    "What is the tech stack of this project?",
    "Fix broken tests",
];

#[derive(Debug, Clone)]
pub struct BilingualConverter {
    /// 保持纯中文的原文（动态内容，避免嵌套）
    pure_keys: Vec<String>,
    max_original_len: usize,
}

impl Default for BilingualConverter {
    fn default() -> Self {
        Self {
            pure_keys: DEFAULT_PURE_KEYS.iter().map(|k| k.to_string()).collect(),
            max_original_len: DEFAULT_MAX_ORIGINAL_LEN,
        }
    }
}

impl BilingualConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换默认的纯中文原文列表
    pub fn with_pure_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pure_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_original_len(mut self, len: usize) -> Self {
        self.max_original_len = len;
        self
    }

    pub fn is_bilingual(original: &str, translated: &str) -> bool {
        translated.contains(&format!("({})", original)) || BILINGUAL_SUFFIX.is_match(translated)
    }

    pub fn convert_pair(&self, original: &str, translated: &str) -> String {
        if self.pure_keys.iter().any(|k| k == original) {
            return match STRIP_SUFFIX.captures(translated) {
                Some(caps) => caps[1].trim().to_string(),
                None => translated.to_string(),
            };
        }

        if Self::is_bilingual(original, translated)
            || original == translated
            || original.chars().count() > self.max_original_len
        {
            return translated.to_string();
        }

        format!("{} ({})", translated, original)
    }

    /// 返回转换后的规则集以及是否有变化
    pub fn convert(&self, rule_set: &RuleSet) -> (RuleSet, bool) {
        let mut converted = rule_set.clone();
        let mut changed = false;
        for (original, translated) in converted.replacements.iter_mut() {
            let next = self.convert_pair(original, translated);
            if next != *translated {
                *translated = next;
                changed = true;
            }
        }
        (converted, changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_original() {
        let conv = BilingualConverter::new();
        assert_eq!(conv.convert_pair("Delete", "删除"), "删除 (Delete)");
    }

    #[test]
    fn test_skips_already_bilingual_and_identical() {
        let conv = BilingualConverter::new();
        assert_eq!(conv.convert_pair("Delete", "删除 (Delete)"), "删除 (Delete)");
        assert_eq!(conv.convert_pair("Remove", "删除 (Remove item)"), "删除 (Remove item)");
        assert_eq!(conv.convert_pair("GPT-4", "GPT-4"), "GPT-4");
    }

    #[test]
    fn test_skips_long_original() {
        let conv = BilingualConverter::new().max_original_len(10);
        assert_eq!(conv.convert_pair("This is a long sentence", "这是长句"), "这是长句");
    }

    #[test]
    fn test_pure_keys_strip_suffix() {
        let conv = BilingualConverter::new().with_pure_keys(["Fix broken tests"]);
        assert_eq!(conv.convert_pair("Fix broken tests", "修复失败的测试 (Fix broken tests)"), "修复失败的测试");
        assert_eq!(conv.convert_pair("Fix broken tests", "修复失败的测试"), "修复失败的测试");
    }

    #[test]
    fn test_default_pure_keys() {
        let conv = BilingualConverter::new();
        assert_eq!(conv.convert_pair("Fix broken tests", "修复失败的测试 (Fix broken tests)"), "修复失败的测试");
        assert_eq!(
            conv.convert_pair("What is the tech stack of this project?", "这个项目的技术栈是什么？"),
            "这个项目的技术栈是什么？"
        );
    }

    #[test]
    fn test_convert_rule_set() {
        let rule_set = RuleSet::parse(
            r#"{"file":"a.tsx","replacements":{"Undo":"撤销","Redo":"重做 (Redo)"}}"#,
            "routes",
            "a.json",
            "routes/a.json",
        )
        .unwrap();

        let (converted, changed) = BilingualConverter::new().convert(&rule_set);
        assert!(changed);
        assert_eq!(converted.replacements["Undo"], "撤销 (Undo)");
        assert_eq!(converted.replacements["Redo"], "重做 (Redo)");

        let (_, changed_again) = BilingualConverter::new().convert(&converted);
        assert!(!changed_again);
    }
}
