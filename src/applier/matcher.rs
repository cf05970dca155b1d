//! 查找串匹配策略
//!
//! - 简单单词（仅 ASCII 字母数字）：ASCII 单词边界匹配，`Copy` 不会命中 `Copyright`
//! - 一般片段：普通子串包含，允许命中更长短语中的一部分

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

use crate::error::I18nResult;
use crate::utils::normalize_newlines;

static SIMPLE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Word,
    Snippet,
}

impl MatchStrategy {
    pub fn classify(find: &str) -> Self {
        if SIMPLE_WORD.is_match(find) {
            MatchStrategy::Word
        } else {
            MatchStrategy::Snippet
        }
    }
}

/// 编译后的查找模式（查找串已做 CRLF → LF 规范化）
#[derive(Debug, Clone)]
pub enum FindPattern {
    Word(Regex),
    Snippet(String),
}

impl FindPattern {
    pub fn compile(find: &str) -> I18nResult<Self> {
        let find = normalize_newlines(find);
        Ok(match MatchStrategy::classify(&find) {
            MatchStrategy::Word => {
                // (?-u:\b)：与 JS/Go 一致的 ASCII 单词边界，中文字符不算单词字符
                let pattern = format!(r"(?-u:\b){}(?-u:\b)", regex::escape(&find));
                FindPattern::Word(Regex::new(&pattern)?)
            }
            MatchStrategy::Snippet => FindPattern::Snippet(find.into_owned()),
        })
    }

    pub fn strategy(&self) -> MatchStrategy {
        match self {
            FindPattern::Word(_) => MatchStrategy::Word,
            FindPattern::Snippet(_) => MatchStrategy::Snippet,
        }
    }

    /// 空查找串永不匹配
    pub fn is_match(&self, content: &str) -> bool {
        match self {
            FindPattern::Word(re) => re.is_match(content),
            FindPattern::Snippet(s) => !s.is_empty() && content.contains(s.as_str()),
        }
    }

    /// 全局替换，替换文本按字面处理（不展开 `$1` 等捕获组引用）
    pub fn replace_all<'a>(&self, content: &'a str, replace: &str) -> Cow<'a, str> {
        match self {
            FindPattern::Word(re) => re.replace_all(content, NoExpand(replace)),
            FindPattern::Snippet(s) if s.is_empty() => Cow::Borrowed(content),
            FindPattern::Snippet(s) => Cow::Owned(content.replace(s.as_str(), replace)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(MatchStrategy::classify("Copy"), MatchStrategy::Word);
        assert_eq!(MatchStrategy::classify("Tab2"), MatchStrategy::Word);
        assert_eq!(MatchStrategy::classify("Copy link"), MatchStrategy::Snippet);
        assert_eq!(MatchStrategy::classify("snake_case"), MatchStrategy::Snippet);
        assert_eq!(MatchStrategy::classify("Ünicode"), MatchStrategy::Snippet);
        assert_eq!(MatchStrategy::classify(""), MatchStrategy::Snippet);
    }

    #[test]
    fn test_word_boundary_rejects_substring() {
        let pattern = FindPattern::compile("Copy").unwrap();
        assert!(!pattern.is_match("Copyright 2024 Inc."));
        assert!(!pattern.is_match("DialogCopy"));
        assert!(pattern.is_match("<text>Copy</text>"));
        assert!(pattern.is_match("\"Copy\""));
    }

    #[test]
    fn test_word_boundary_is_ascii() {
        // 紧邻中文时仍视为单词边界
        let pattern = FindPattern::compile("Copy").unwrap();
        assert!(pattern.is_match("复制Copy"));
        assert_eq!(pattern.replace_all("点击Copy按钮", "复制"), "点击复制按钮");
    }

    #[test]
    fn test_word_replace_all_occurrences() {
        let pattern = FindPattern::compile("Undo").unwrap();
        assert_eq!(pattern.replace_all("Undo / Undone / Undo", "撤销"), "撤销 / Undone / 撤销");
    }

    #[test]
    fn test_replacement_is_literal() {
        let pattern = FindPattern::compile("Price").unwrap();
        assert_eq!(pattern.replace_all("Price", "价格 $1"), "价格 $1");
    }

    #[test]
    fn test_snippet_matches_inside_longer_phrase() {
        let pattern = FindPattern::compile("Copy link").unwrap();
        assert!(pattern.is_match("Copy link to clipboard"));
        assert_eq!(pattern.replace_all("Copy link to clipboard", "复制链接"), "复制链接 to clipboard");
    }

    #[test]
    fn test_crlf_find_is_normalized() {
        let pattern = FindPattern::compile("line one\r\nline two").unwrap();
        assert!(pattern.is_match("line one\nline two"));
    }

    #[test]
    fn test_empty_find_never_matches() {
        let pattern = FindPattern::compile("").unwrap();
        assert!(!pattern.is_match("anything"));
        assert_eq!(pattern.replace_all("anything", "x"), "anything");
    }
}
