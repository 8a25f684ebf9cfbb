//! `POST /api/analyze-image`: the gateway route.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::builder::{FormVariant, SuggestionSet};
use crate::errors::AppError;
use crate::gateway::{GatewayError, ImagePayload};
use crate::state::AppState;

pub const ANALYZE_IMAGE_PATH: &str = "/api/analyze-image";

/// `image` is base64 without a data-URL prefix; `mediaType` defaults to `image/png`.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeImageRequest {
    pub image: Option<String>,
    pub media_type: Option<String>,
    pub variant: Option<FormVariant>,
}

/// POST /api/analyze-image
///
/// Returns the flat suggestion object for the requested variant, or `{error}`:
/// 400 for a missing image, 500 for a missing key, an unreadable body or a failed
/// analysis.
pub async fn handle_analyze_image(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeImageRequest>, JsonRejection>,
) -> Result<Json<SuggestionSet>, AppError> {
    let Json(req) =
        payload.map_err(|rejection| GatewayError::InvalidRequest(rejection.body_text()))?;
    let image = req
        .image
        .filter(|data| !data.trim().is_empty())
        .ok_or(GatewayError::MissingImage)?;

    let payload = ImagePayload {
        data: image,
        media_type: req
            .media_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| crate::gateway::DEFAULT_MEDIA_TYPE.to_string()),
    };
    let variant = req.variant.unwrap_or_default();

    let suggestions = state.analyzer.analyze(&payload, variant).await?;
    Ok(Json(suggestions))
}
