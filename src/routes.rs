use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/linodes/create",
            get(handlers::create_get)
                .patch(handlers::create_patch)
                .post(handlers::create_post),
        )
        .route("/linodes/create/validate", post(handlers::create_validate))
        .route(
            "/object-storage/buckets/:cluster/:bucket",
            get(handlers::bucket_objects_get),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
