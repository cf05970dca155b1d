//! 占位符提取
//!
//! 仅做词法层面的花括号扫描，识别 `{name}` 形式的简单插值变量。
//! 含空白、点号、引号、括号、方括号或 `?` 的片段视为代码表达式，直接丢弃；
//! 空的 `{}` 不含这些字符，记为空名变量。
//! 花括号不要求配对：孤立的 `}` 被忽略，未闭合的 `{` 不产生变量，
//! 捕获中再次遇到 `{` 时从该位置重新开始捕获。

use rustc_hash::FxHashMap;

/// 视为表达式而非变量的字符
const EXPRESSION_CHARS: [char; 8] = ['.', '"', '\'', '(', ')', '[', ']', '?'];

/// 占位符多重集（保留出现顺序，重复计数）
#[derive(Debug, Clone, Default)]
pub struct PlaceholderSet {
    names: Vec<String>,
    counts: FxHashMap<String, usize>,
}

impl PlaceholderSet {
    fn push(&mut self, name: String) {
        *self.counts.entry(name.clone()).or_insert(0) += 1;
        self.names.push(name);
    }

    /// 按出现顺序的全部变量名
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }

    /// self 中有、other 中完全没有的变量（保持 self 中的顺序与重复）
    ///
    /// 只看名称是否出现，不比较次数；次数不一致由多重集比较负责
    pub fn missing_from(&self, other: &PlaceholderSet) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| !other.counts.contains_key(name.as_str()))
            .cloned()
            .collect()
    }
}

impl PartialEq for PlaceholderSet {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for PlaceholderSet {}

pub struct PlaceholderExtractor;

impl PlaceholderExtractor {
    pub fn extract(s: &str) -> PlaceholderSet {
        let mut set = PlaceholderSet::default();
        let mut current = String::new();
        let mut capturing = false;

        for c in s.chars() {
            match c {
                '{' => {
                    capturing = true;
                    current.clear();
                }
                '}' if capturing => {
                    if Self::is_bare_name(&current) {
                        set.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    capturing = false;
                }
                _ if capturing => current.push(c),
                _ => {}
            }
        }
        set
    }

    fn is_bare_name(token: &str) -> bool {
        !token
            .chars()
            .any(|c| c.is_whitespace() || EXPRESSION_CHARS.contains(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(s: &str) -> Vec<String> {
        PlaceholderExtractor::extract(s).names().to_vec()
    }

    #[test]
    fn test_extract_simple_names() {
        assert_eq!(names("Hello {name}, you have {count} items"), vec!["name", "count"]);
        assert_eq!(names("{a}{a}{b}"), vec!["a", "a", "b"]);
    }

    #[test]
    fn test_expressions_are_discarded() {
        assert!(names("{props.title}").is_empty());
        assert!(names("{t(\"key\")}").is_empty());
        assert!(names("{items[0]}").is_empty());
        assert!(names("{ok ? 'yes' : 'no'}").is_empty());
        assert!(names("{a b}").is_empty());
        assert!(names("{'quoted'}").is_empty());
    }

    #[test]
    fn test_empty_braces_are_a_placeholder() {
        assert_eq!(names("Press {} to continue"), vec![""]);
        assert_eq!(names("{}{x}"), vec!["", "x"]);
    }

    #[test]
    fn test_unbalanced_braces_degrade_gracefully() {
        assert!(names("stray } brace").is_empty());
        assert!(names("unterminated {name").is_empty());
        // 捕获中再次遇到 { 时重新开始
        assert_eq!(names("{outer {inner}"), vec!["inner"]);
        assert_eq!(names("}}{x}}"), vec!["x"]);
    }

    #[test]
    fn test_unicode_content() {
        assert_eq!(names("你好 {用户名}，欢迎"), vec!["用户名"]);
    }

    #[test]
    fn test_multiset_equality() {
        let a = PlaceholderExtractor::extract("{x} and {y}");
        let b = PlaceholderExtractor::extract("{y} 和 {x}");
        let c = PlaceholderExtractor::extract("{x} {x} {y}");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_missing_from_ignores_occurrence_count() {
        let find = PlaceholderExtractor::extract("{a} {a} {b} {c} {b}");
        let replace = PlaceholderExtractor::extract("{a} {c} {d}");
        assert_eq!(find.missing_from(&replace), vec!["b", "b"]);
        assert!(replace.missing_from(&replace).is_empty());
    }
}
