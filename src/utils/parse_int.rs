/// Parse an optional numeric id from a query value.
///
/// Blank, non-numeric and negative input all yield `None`; a malformed id
/// never collapses to zero.
///
/// ```
/// use lcm::utils::parse_optional_id;
///
/// assert_eq!(parse_optional_id(Some(" 42 ")), Some(42));
/// assert_eq!(parse_optional_id(Some("12abc")), None);
/// assert_eq!(parse_optional_id(Some("")), None);
/// assert_eq!(parse_optional_id(None), None);
/// ```
pub fn parse_optional_id(value: Option<&str>) -> Option<u64> {
    value.and_then(|v| {
        let t = v.trim();
        if t.is_empty() {
            None
        } else {
            t.parse::<u64>().ok()
        }
    })
}
