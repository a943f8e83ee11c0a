const ELLIPSIS: &str = "...";

/// Keep the first `max` characters of `text`, marking the cut with an ellipsis.
pub fn truncate_end(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max).collect();
    format!("{}{}", head, ELLIPSIS)
}

/// Keep both ends of `text`, eliding the middle.
///
/// ```
/// use lcm::utils::truncate_middle;
///
/// assert_eq!(truncate_middle("backups/2024/archive.tar.gz", 10), "backu...ar.gz");
/// assert_eq!(truncate_middle("short.txt", 10), "short.txt");
/// ```
pub fn truncate_middle(text: &str, max: usize) -> String {
    let len = text.chars().count();
    if len <= max {
        return text.to_string();
    }
    let half = max / 2;
    let head: String = text.chars().take(half).collect();
    let tail: String = text.chars().skip(len - (max - half)).collect();
    format!("{}{}{}", head, ELLIPSIS, tail)
}
