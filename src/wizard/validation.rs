use std::net::Ipv4Addr;

use crate::models::{PlacementGroup, Region};

/// Root password policy. Returns the reason a password is rejected.
pub trait PasswordValidator: Send + Sync {
    fn validate(&self, password: &str) -> Option<String>;
}

/// Length bounds plus a minimum number of character classes
/// (lowercase, uppercase, digits, punctuation).
#[derive(Debug, Clone, Copy)]
pub struct CharacterClassPolicy {
    pub min_length: usize,
    pub max_length: usize,
    pub min_classes: usize,
}

impl Default for CharacterClassPolicy {
    fn default() -> Self {
        CharacterClassPolicy {
            min_length: 7,
            max_length: 128,
            min_classes: 2,
        }
    }
}

impl PasswordValidator for CharacterClassPolicy {
    fn validate(&self, password: &str) -> Option<String> {
        let len = password.chars().count();
        if len < self.min_length || len > self.max_length {
            return Some(format!(
                "Password must be between {} and {} characters.",
                self.min_length, self.max_length
            ));
        }
        let classes = [
            password.chars().any(|c| c.is_lowercase()),
            password.chars().any(|c| c.is_uppercase()),
            password.chars().any(|c| c.is_ascii_digit()),
            password.chars().any(|c| c.is_ascii_punctuation()),
        ]
        .iter()
        .filter(|present| **present)
        .count();
        if classes < self.min_classes {
            return Some(
                "Password must contain at least two of the following character classes: \
                 uppercase letters, lowercase letters, numbers, and punctuation."
                    .to_string(),
            );
        }
        None
    }
}

/// Reason the group cannot take another instance in `region`, if any.
/// A region without a per-group limit never reports a full group.
pub fn placement_group_capacity_error(
    group: &PlacementGroup,
    region: Option<&Region>,
) -> Option<String> {
    let limit = region
        .and_then(|r| r.placement_group_limits.as_ref())
        .and_then(|l| l.maximum_linodes_per_pg)?;
    if group.members.len() < limit as usize {
        return None;
    }
    Some(format!(
        "{} ({}) doesn't have any capacity for this Linode.",
        group.label,
        group.placement_group_type.display_label()
    ))
}

/// A bare dotted-quad IPv4 address; masks are rejected.
///
/// ```
/// use lcm::wizard::is_valid_vpc_ipv4;
///
/// assert!(is_valid_vpc_ipv4("10.0.0.4"));
/// assert!(!is_valid_vpc_ipv4("10.0.0.4/32"));
/// assert!(!is_valid_vpc_ipv4(""));
/// ```
pub fn is_valid_vpc_ipv4(value: &str) -> bool {
    let value = value.trim();
    !value.contains('/') && value.parse::<Ipv4Addr>().is_ok()
}

/// An IPv4 range in CIDR notation, e.g. `10.0.0.1/24`.
pub fn is_valid_ipv4_cidr(value: &str) -> bool {
    let mut parts = value.trim().splitn(2, '/');
    let addr = parts.next().unwrap_or("");
    let Some(prefix) = parts.next() else {
        return false;
    };
    addr.parse::<Ipv4Addr>().is_ok() && prefix.parse::<u8>().map(|p| p <= 32).unwrap_or(false)
}
