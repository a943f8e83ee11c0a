/// Parse a boolean flag from an optional string value.
///
/// ```
/// use lcm::utils::parse_flag;
///
/// assert!(parse_flag(Some("on"), false));
/// assert!(!parse_flag(Some("0"), true));
/// assert!(parse_flag(Some("  "), true));
/// assert!(!parse_flag(None, false));
/// ```
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) => {
            let t = v.trim().to_lowercase();
            if t.is_empty() {
                default
            } else {
                matches!(t.as_str(), "1" | "true" | "yes" | "on")
            }
        }
        None => default,
    }
}
