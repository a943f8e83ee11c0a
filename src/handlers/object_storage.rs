use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::api::load_objects;
use crate::models::AppState;
use crate::services::{extend_objects, table_content};

fn default_width() -> u16 {
    1280
}

#[derive(Debug, Deserialize)]
pub struct ObjectListQuery {
    #[serde(default)]
    pub prefix: String,
    /// Viewport width of the caller, used to pick the name truncation.
    #[serde(default = "default_width")]
    pub width: u16,
}

/// GET /object-storage/buckets/:cluster/:bucket
pub async fn bucket_objects_get(
    State(state): State<AppState>,
    Path((cluster, bucket)): Path<(String, String)>,
    Query(q): Query<ObjectListQuery>,
) -> Response {
    let listing = load_objects(
        &state.client,
        &state.api_base_url,
        &state.api_token,
        &cluster,
        &bucket,
        &q.prefix,
    )
    .await;

    let content = match listing {
        Ok(objects) => {
            let data = extend_objects(objects, &q.prefix);
            table_content(&data, false, None, &q.prefix, q.width)
        }
        Err(e) => {
            tracing::warn!(error = %e, %cluster, %bucket, "Object listing failed");
            let errors = e.into_api_errors();
            table_content(&[], false, Some(errors.as_slice()), &q.prefix, q.width)
        }
    };
    Json(content).into_response()
}
