mod common;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use lcm::models::{AppState, FeatureFlags};
use lcm::routes::build_router;

use common::{context, ready_form};

// Nothing in these tests reaches the network: the form is placed in state directly.
fn state() -> AppState {
    AppState::new("http://127.0.0.1:9".to_string(), String::new(), FeatureFlags::default())
}

async fn send(state: &AppState, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(v) => Body::from(v.to_string()),
            None => Body::empty(),
        })
        .unwrap();
    let response = build_router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_patch_before_open_is_not_found() {
    let state = state();
    let (status, body) = send(&state, Method::PATCH, "/linodes/create", Some(json!([]))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["errors"].is_array());
}

#[tokio::test]
async fn test_patch_applies_updates_and_returns_label() {
    let state = state();
    *state.form.lock().unwrap() = Some(ready_form(context()));

    let updates = json!([
        { "action": "set_region", "value": "eu-west" },
        { "action": "set_tags", "value": ["prod"] }
    ]);
    let (status, body) = send(&state, Method::PATCH, "/linodes/create", Some(updates)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "debian-eu-west");
    assert_eq!(body["draft"]["region"], "eu-west");
    assert_eq!(body["draft"]["tags"][0]["label"], "prod");
}

#[tokio::test]
async fn test_validate_returns_payload_or_errors() {
    let state = state();
    *state.form.lock().unwrap() = Some(ready_form(context()));

    let (status, body) = send(&state, Method::POST, "/linodes/create/validate", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["label"], "debian-us-east");
    assert_eq!(body["booted"], true);

    send(
        &state,
        Method::PATCH,
        "/linodes/create",
        Some(json!([{ "action": "set_type", "value": "" }])),
    )
    .await;
    let (status, body) = send(&state, Method::POST, "/linodes/create/validate", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "type");
}

#[tokio::test]
async fn test_submit_rejected_locally_maps_field_errors() {
    let state = state();
    let mut form = ready_form(context());
    form.set_create_type(lcm::wizard::CreateType::FromBackup);
    *state.form.lock().unwrap() = Some(form);

    let (status, body) = send(&state, Method::POST, "/linodes/create", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["outcome"], "rejected");
    assert_eq!(body["field_errors"]["fields"]["backup_id"], "You must select a Backup.");
}

#[tokio::test]
async fn test_submit_transport_failure_releases_form() {
    let state = state();
    *state.form.lock().unwrap() = Some(ready_form(context()));

    let (status, body) = send(&state, Method::POST, "/linodes/create", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["outcome"], "rejected");
    assert_eq!(body["errors"][0]["reason"], lcm::wizard::DEFAULT_ERROR_MESSAGE);

    let (status, body) = send(&state, Method::PATCH, "/linodes/create", Some(json!([]))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draft"]["submission"]["form_is_submitting"], false);
    assert_eq!(body["field_errors"]["none"], lcm::wizard::DEFAULT_ERROR_MESSAGE);
}
