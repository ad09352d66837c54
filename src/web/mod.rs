pub mod render;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::s3::ObjectStore;
use crate::vfs::ListingPolicy;

/// Per-process state shared by every handler
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn ObjectStore>,
    bucket: Arc<str>,
    policy: ListingPolicy,
}

impl AppState {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<Arc<str>>, policy: ListingPolicy) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            policy,
        }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn policy(&self) -> ListingPolicy {
        self.policy
    }
}

/// Build the application router
pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::index_handler))
        .route("/health", get(routes::health_handler))
        .route("/go", get(routes::go_handler))
        .route("/path", get(routes::browse_handler))
        .route("/path/", get(routes::browse_handler))
        .route("/path/*prefix", get(routes::browse_handler))
        .route("/upload", post(routes::upload_handler))
        .route("/download/:bucket/*key", get(routes::download_handler))
        .route("/api/list", get(routes::api_list_handler))
        .route("/api/navigate", post(routes::api_navigate_handler))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
