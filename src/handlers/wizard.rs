use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::{AppState, CreateLinodeRequest};
use crate::services::{after_create, dispatch, load_create_context, parse_create_query, seed_form, SubmitOutcome};
use crate::wizard::{
    CharacterClassPolicy, CreateForm, CreationDraft, DraftUpdate, ErrorMap, SubmitError,
    SubmitGate, CREATE_ERROR_FIELDS,
};
use super::helpers::{error_response, form_not_open, lock_form, upstream_error};

/// What the browser needs to render the form.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub draft: CreationDraft,
    /// The label that would be sent right now.
    pub label: String,
    pub show_user_data: bool,
    pub field_errors: ErrorMap,
}

impl FormView {
    fn of(form: &CreateForm) -> Self {
        let errors = form.draft().submission.errors.as_deref().unwrap_or_default();
        FormView {
            draft: form.draft().clone(),
            label: form.label(),
            show_user_data: form.user_data_supported(),
            field_errors: ErrorMap::from_errors(CREATE_ERROR_FIELDS, errors),
        }
    }
}

#[derive(Debug, Serialize)]
struct SubmitView {
    #[serde(flatten)]
    outcome: SubmitOutcome,
    field_errors: ErrorMap,
}

/// GET /linodes/create. Opens a fresh form seeded from the query string.
pub async fn create_get(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Response {
    let query = parse_create_query(&q);
    let context = match load_create_context(
        &state.client,
        &state.api_base_url,
        &state.api_token,
        state.flags,
    )
    .await
    {
        Ok(ctx) => ctx,
        Err(e) => return upstream_error(e),
    };

    let form = seed_form(&query, context);
    let view = FormView::of(&form);
    *lock_form(&state) = Some(form);
    Json(view).into_response()
}

/// PATCH /linodes/create. Applies a batch of updates in order.
pub async fn create_patch(
    State(state): State<AppState>,
    Json(updates): Json<Vec<DraftUpdate>>,
) -> Response {
    let mut guard = lock_form(&state);
    let Some(form) = guard.as_mut() else {
        return form_not_open();
    };
    for update in updates {
        form.apply(update);
    }
    Json(FormView::of(form)).into_response()
}

/// POST /linodes/create/validate. Returns the body that would be sent.
pub async fn create_validate(State(state): State<AppState>) -> Response {
    let mut guard = lock_form(&state);
    let Some(form) = guard.as_mut() else {
        return form_not_open();
    };
    match form.check_validation() {
        Ok(payload) => Json::<CreateLinodeRequest>(payload).into_response(),
        Err(errors) => error_response(StatusCode::UNPROCESSABLE_ENTITY, errors),
    }
}

/// POST /linodes/create. The form lock is released while the request is in
/// flight; a second submit in that window is refused. If the form is replaced
/// meanwhile, the late result is reported without touching the new draft.
pub async fn create_post(State(state): State<AppState>) -> Response {
    let gate = {
        let mut guard = lock_form(&state);
        let Some(form) = guard.as_mut() else {
            return form_not_open();
        };
        form.begin_submit(&CharacterClassPolicy::default())
    };

    let request = match gate {
        Err(SubmitError::AlreadySubmitting) => {
            return (StatusCode::CONFLICT, SubmitError::AlreadySubmitting.to_string()).into_response()
        }
        Ok(SubmitGate::Rejected(errors)) => {
            return submit_response(SubmitOutcome::Rejected { errors }, StatusCode::UNPROCESSABLE_ENTITY)
        }
        Ok(SubmitGate::AwaitingFirewallAcknowledgement) => {
            return submit_response(SubmitOutcome::AwaitingFirewallAcknowledgement, StatusCode::ACCEPTED)
        }
        Ok(SubmitGate::Ready(request)) => request,
    };

    let backend = state.backend();
    let result = dispatch(&backend, &request).await;

    // The guard is a temporary of this statement and is released before the
    // follow-up calls below.
    let finished = match lock_form(&state).as_mut() {
        Some(form) => form.finish_submit(request.ticket, result),
        None => result.map_err(|e| e.into_api_errors()),
    };

    match finished {
        Ok(linode) => {
            let outcome = after_create(&backend, &request, linode).await;
            submit_response(outcome, StatusCode::CREATED)
        }
        Err(errors) => submit_response(SubmitOutcome::Rejected { errors }, StatusCode::UNPROCESSABLE_ENTITY),
    }
}

fn submit_response(outcome: SubmitOutcome, status: StatusCode) -> Response {
    let field_errors = match &outcome {
        SubmitOutcome::Rejected { errors } => ErrorMap::from_errors(CREATE_ERROR_FIELDS, errors),
        _ => ErrorMap::default(),
    };
    (status, Json(SubmitView { outcome, field_errors })).into_response()
}
