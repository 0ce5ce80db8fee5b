//! 文案工具类
//!
//! 按字符（而非字节）截断，避免切断多字节字符或 Emoji

/// 软截断时去掉的尾部字符
const SOFT_TRIM_CHARS: &[char] = &[' ', '.', ',', ';', ':', '!', '\n'];

/// 截取前 `limit` 个字符
pub fn truncate_chars(input: &str, limit: usize) -> &str {
    match input.char_indices().nth(limit) {
        Some((end, _)) => &input[..end],
        None => input,
    }
}

/// 限制文案长度
///
/// 未超长时原样返回；超长时截断后再去掉尾部的空格和标点
pub fn clamp_text(input: &str, limit: usize) -> String {
    if input.is_empty() {
        return String::new();
    }
    if input.chars().count() <= limit {
        return input.to_string();
    }
    truncate_chars(input, limit)
        .trim_end_matches(SOFT_TRIM_CHARS)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("抖音抖音", 3), "抖音抖");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn clamp_soft_trims_only_when_over_limit() {
        assert_eq!(clamp_text("short.", 10), "short.");
        assert_eq!(clamp_text("hello, world", 6), "hello");
        assert_eq!(clamp_text("", 3), "");
        let long = "a".repeat(300);
        assert_eq!(clamp_text(&long, 270).chars().count(), 270);
    }
}
