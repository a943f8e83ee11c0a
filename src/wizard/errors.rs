use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;

use crate::models::ApiError;

pub const DEFAULT_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Fields the create form can show an error next to. Anything else lands
/// in the general slot.
pub const CREATE_ERROR_FIELDS: &[&str] = &[
    "backup_id",
    "image",
    "label",
    "linode_id",
    "region",
    "root_pass",
    "stackscript_id",
    "type",
    "interfaces[1].label",
    "interfaces[1].ipam_address",
    "interfaces[0].subnet_id",
    "ipv4.vpc",
    "placement_group",
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("A create request is already in flight")]
    AlreadySubmitting,
}

/// API errors routed to the form field that displays them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorMap {
    pub fields: BTreeMap<String, String>,
    /// Message for errors without a known field. The last one wins.
    pub none: Option<String>,
}

impl ErrorMap {
    pub fn from_errors(allowed: &[&str], errors: &[ApiError]) -> Self {
        let mut map = ErrorMap::default();
        for error in errors {
            match error.field.as_deref() {
                Some(field) if allowed.contains(&field) => {
                    map.fields.insert(field.to_string(), error.reason.clone());
                }
                _ => map.none = Some(error.reason.clone()),
            }
        }
        map
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.none.is_none()
    }
}
