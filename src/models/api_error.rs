use serde::{Deserialize, Serialize};

/// A single `{field, reason}` entry as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub reason: String,
}

impl ApiError {
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ApiError {
            field: Some(field.into()),
            reason: reason.into(),
        }
    }

    pub fn general(reason: impl Into<String>) -> Self {
        ApiError {
            field: None,
            reason: reason.into(),
        }
    }
}
