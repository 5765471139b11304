/// Truncate a string to a maximum number of characters, adding an ellipsis
/// if anything was cut.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Row count for dashboard tiles: "1 record", "12 records".
pub fn format_count(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Pad `left` and `right` apart so together they fill `width` columns.
pub fn spread(left: &str, right: &str, width: usize) -> String {
    let used = left.chars().count() + right.chars().count();
    format!("{}{}{}", left, " ".repeat(width.saturating_sub(used)), right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("hello", 2), "he");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        assert_eq!(truncate_string("Zürich Großhandel", 9), "Zürich...");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0, "record"), "0 records");
        assert_eq!(format_count(1, "record"), "1 record");
        assert_eq!(format_count(42, "record"), "42 records");
    }

    #[test]
    fn test_spread() {
        assert_eq!(spread("ab", "cd", 8), "ab    cd");
        assert_eq!(spread("abcdef", "gh", 4), "abcdefgh");
    }
}
