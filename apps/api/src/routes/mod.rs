pub mod health;
pub mod save;

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::analysis::handlers;
use crate::analysis::upload::MAX_BODY_BYTES;
use crate::errors::AppError;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let review_routes = Router::new()
        .route("/analyze/resume", post(handlers::handle_analyze))
        // Legacy roast flow, kept for older clients
        .route("/roast/resume", post(handlers::handle_roast))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES));

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/save", post(save::save_handler))
        .merge(review_routes)
        .layer(CatchPanicLayer::custom(panic_response))
        .with_state(state)
}

/// Last-resort boundary: a panic in any handler becomes a generic 500.
fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    AppError::Internal(anyhow::anyhow!("handler panicked: {detail}")).into_response()
}
