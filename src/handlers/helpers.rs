use std::sync::{MutexGuard, PoisonError};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::api::ApiCallError;
use crate::models::{ApiError, AppState};
use crate::wizard::CreateForm;

/// Lock the shared form. A panic in another handler leaves the draft usable,
/// so poisoning is ignored.
pub fn lock_form(state: &AppState) -> MutexGuard<'_, Option<CreateForm>> {
    state.form.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `{"errors": [...]}` with the given status, the same envelope the API uses.
pub fn error_response(status: StatusCode, errors: Vec<ApiError>) -> Response {
    (status, Json(json!({ "errors": errors }))).into_response()
}

pub fn upstream_error(err: ApiCallError) -> Response {
    tracing::error!(error = %err, "Upstream API call failed");
    error_response(StatusCode::BAD_GATEWAY, err.into_api_errors())
}

pub fn form_not_open() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        vec![ApiError::general("Open the create form before changing it.")],
    )
}
