pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::builder::handlers;
use crate::gateway::handlers::{handle_analyze_image, ANALYZE_IMAGE_PATH};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Image analysis gateway
        .route(ANALYZE_IMAGE_PATH, post(handle_analyze_image))
        // Prompt builder engine
        .route("/api/v1/prompt/assemble", post(handlers::handle_assemble))
        .route("/api/v1/prompt/toggle", post(handlers::handle_toggle))
        .route("/api/v1/prompt/upload", post(handlers::handle_upload))
        .route("/api/v1/prompt/download", post(handlers::handle_download))
        .route("/api/v1/prompt/enhance", post(handlers::handle_enhance))
        .with_state(state)
}
