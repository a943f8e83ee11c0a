use std::collections::HashSet;

/// Longest label the API accepts.
pub const MAX_LABEL_LENGTH: usize = 64;

const FALLBACK_LABEL: &str = "linode";

/// Lowercase, map anything outside `[a-z0-9]` to `-`, squeeze runs of `-`
/// and trim them from both ends.
fn clean_part(part: &str) -> String {
    let mut out = String::with_capacity(part.len());
    for c in part.trim().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_matches('-').to_string()
}

fn truncate_label(label: &str, max: usize) -> String {
    let truncated: String = label.chars().take(max).collect();
    truncated.trim_end_matches('-').to_string()
}

/// Join the non-empty label parts with `-` and make the result unique
/// against `existing_labels`.
///
/// ```
/// use lcm::wizard::derive_default_label;
///
/// let existing = vec!["debian-us-east".to_string()];
/// assert_eq!(derive_default_label(&["Debian", "us-east", ""], &existing), "debian-us-east-1");
/// assert_eq!(derive_default_label(&["Ubuntu", "us-east", ""], &existing), "ubuntu-us-east");
/// ```
pub fn derive_default_label<S: AsRef<str>>(parts: &[&str], existing_labels: &[S]) -> String {
    let joined = parts
        .iter()
        .map(|p| clean_part(p))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    let base = if joined.is_empty() {
        FALLBACK_LABEL.to_string()
    } else {
        truncate_label(&joined, MAX_LABEL_LENGTH)
    };
    let existing: HashSet<&str> = existing_labels.iter().map(|l| l.as_ref()).collect();
    ensure_unique_label(&base, &existing, MAX_LABEL_LENGTH)
}

/// Append `-1`, `-2`, ... until the label is not taken, shortening the base
/// so the result never exceeds `max_length`.
pub fn ensure_unique_label(label: &str, existing: &HashSet<&str>, max_length: usize) -> String {
    if !existing.contains(label) {
        return label.to_string();
    }
    let mut counter: u32 = 1;
    loop {
        let suffix = format!("-{}", counter);
        let room = max_length.saturating_sub(suffix.len());
        let candidate = format!("{}{}", truncate_label(label, room), suffix);
        if !existing.contains(candidate.as_str()) {
            return candidate;
        }
        counter += 1;
    }
}
