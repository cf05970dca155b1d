use std::borrow::Cow;

/// CRLF → LF
pub fn normalize_newlines(s: &str) -> Cow<'_, str> {
    if s.contains("\r\n") {
        Cow::Owned(s.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(s)
    }
}

/// 按字符数截断，超出部分以 `...` 结尾
pub fn truncate(s: &str, width: usize) -> Cow<'_, str> {
    match s.char_indices().nth(width) {
        Some((idx, _)) => Cow::Owned(format!("{}...", &s[..idx])),
        None => Cow::Borrowed(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\r\n"), "a\nb\n");
        assert!(matches!(normalize_newlines("a\nb"), Cow::Borrowed(_)));
        // 孤立的 \r 保持不变
        assert_eq!(normalize_newlines("a\rb"), "a\rb");
    }

    #[test]
    fn test_truncate_by_chars() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello", 5), "hello");
        assert_eq!(truncate("hello world", 5), "hello...");
        assert_eq!(truncate("正在加载消息", 2), "正在...");
    }
}
