use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version and whether image analysis
/// has a credential.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let image_analysis = if state.config.anthropic_api_key.is_some() {
        "configured"
    } else {
        "disabled"
    };
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "prompt-builder-api",
        "imageAnalysis": image_analysis
    }))
}
