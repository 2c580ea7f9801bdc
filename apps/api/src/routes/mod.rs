pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tools::handlers;

/// Headroom on top of the file limit for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // AI tools (single dispatch endpoint used by the browser client)
        .route("/api/ai", post(handlers::handle_ai))
        .route(
            "/api/v1/budget/evaluate",
            post(handlers::handle_budget_evaluate),
        )
        .route("/api/v1/jobs/search", post(handlers::handle_job_search))
        .route(
            "/api/v1/files/extract",
            post(handlers::handle_file_extract).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .with_state(state)
}
