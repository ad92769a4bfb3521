pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::state::AppState;
use crate::suggestion::handlers;

/// Non-POST methods on the suggestion route land here; the resolver is
/// never invoked.
async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/suggestions",
            post(handlers::handle_suggest).fallback(method_not_allowed),
        )
        .with_state(state)
}
