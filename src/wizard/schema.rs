use crate::models::{ApiError, CreateLinodeRequest, InterfacePurpose};
use super::models::CreateType;
use super::validation::is_valid_ipv4_cidr;

const MAX_INTERFACES: usize = 3;
const MAX_USER_DATA_BYTES: usize = 16 * 1024;

fn label_errors(label: &str) -> Option<&'static str> {
    let len = label.chars().count();
    if !(3..=64).contains(&len) {
        return Some("Label must be between 3 and 64 characters.");
    }
    if !label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Some("Label can only contain letters, numbers, periods, dashes, and underscores.");
    }
    let starts = label.chars().next().map(|c| c.is_ascii_alphanumeric()).unwrap_or(false);
    let ends = label.chars().last().map(|c| c.is_ascii_alphanumeric()).unwrap_or(false);
    if !starts || !ends {
        return Some("Label must begin and end with a letter or number.");
    }
    if label.contains("--") || label.contains("__") || label.contains("..") {
        return Some("Label must not contain two dashes, underscores, or periods in a row.");
    }
    None
}

/// Validate an assembled create request, collecting every failure.
pub fn validate_create_request(
    payload: &CreateLinodeRequest,
    create_type: CreateType,
) -> Result<(), Vec<ApiError>> {
    let mut errors = Vec::new();

    if payload.region.trim().is_empty() {
        errors.push(ApiError::field("region", "Region is required."));
    }
    if payload.type_id.trim().is_empty() {
        errors.push(ApiError::field("type", "Plan is required."));
    }
    if let Some(reason) = label_errors(&payload.label) {
        errors.push(ApiError::field("label", reason));
    }
    if create_type != CreateType::FromLinode
        && payload.image.is_some()
        && payload.root_pass.is_none()
    {
        errors.push(ApiError::field("root_pass", "Root Password is required."));
    }

    if let Some(interfaces) = &payload.interfaces {
        if interfaces.len() > MAX_INTERFACES {
            errors.push(ApiError::field(
                "interfaces",
                format!("You can assign up to {} interfaces.", MAX_INTERFACES),
            ));
        }
        for (i, interface) in interfaces.iter().enumerate() {
            match interface.purpose {
                InterfacePurpose::Vpc if interface.subnet_id.is_none() => {
                    errors.push(ApiError::field(
                        format!("interfaces[{}].subnet_id", i),
                        "Subnet is required.",
                    ));
                }
                InterfacePurpose::Vlan => {
                    if interface.label.as_deref().unwrap_or("").is_empty() {
                        errors.push(ApiError::field(
                            format!("interfaces[{}].label", i),
                            "VLAN label is required.",
                        ));
                    }
                    if let Some(ipam) = interface.ipam_address.as_deref() {
                        if !ipam.is_empty() && !is_valid_ipv4_cidr(ipam) {
                            errors.push(ApiError::field(
                                format!("interfaces[{}].ipam_address", i),
                                "Must be a valid IPv4 range, e.g. 192.0.2.0/24.",
                            ));
                        }
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(metadata) = &payload.metadata {
        if metadata.user_data.len() > MAX_USER_DATA_BYTES {
            errors.push(ApiError::field(
                "metadata.user_data",
                "User data must be 16KB or less.",
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
