use thiserror::Error;

use crate::models::ApiError;
use crate::wizard::errors::DEFAULT_ERROR_MESSAGE;

/// Errors that can occur while talking to the API
#[derive(Debug, Error)]
pub enum ApiCallError {
    /// Connection, TLS or timeout failures
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the JSON we expected
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Non-success status without an error envelope
    #[error("API returned status {0}")]
    Status(u16),

    /// The API rejected the request with field-scoped reasons
    #[error("API error: {}", join_reasons(.0))]
    Api(Vec<ApiError>),
}

fn join_reasons(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|e| match &e.field {
            Some(field) => format!("{}: {}", field, e.reason),
            None => e.reason.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApiCallError {
    /// The API's own error list, or a single generic entry for anything else.
    pub fn into_api_errors(self) -> Vec<ApiError> {
        match self {
            ApiCallError::Api(errors) if !errors.is_empty() => errors,
            other => {
                tracing::warn!(error = %other, "Unexpected API failure");
                vec![ApiError::general(DEFAULT_ERROR_MESSAGE)]
            }
        }
    }
}
