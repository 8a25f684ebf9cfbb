//! Image Analysis Gateway: turns an uploaded image into a `SuggestionSet`.
//!
//! The engine only sees the `ImageAnalyzer` trait. Backends:
//! - `ClaudeImageAnalyzer`: calls the vision model through `LlmClient` (server side).
//! - `RemoteAnalyzer`: posts to a running gateway's `/api/analyze-image` route.
//!
//! One request, one reply: no retry, no streaming.

pub mod claude;
pub mod handlers;
pub mod prompts;
pub mod remote;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::builder::{FormVariant, SuggestionSet};
use crate::llm_client::LlmError;

pub use claude::ClaudeImageAnalyzer;
pub use remote::RemoteAnalyzer;

pub const DEFAULT_MEDIA_TYPE: &str = "image/png";

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("No image provided")]
    MissingImage,

    #[error("API key not configured")]
    MissingCredential,

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Model(#[from] LlmError),

    #[error("No text response from model")]
    NonTextReply,

    #[error("Malformed suggestion JSON: {0}")]
    MalformedReply(#[from] serde_json::Error),

    #[error("Gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Gateway rejected request (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// A base64 image ready for the model. `data` never carries a data-URL prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub data: String,
    pub media_type: String,
}

impl ImagePayload {
    pub fn from_bytes(bytes: &[u8], media_type: impl Into<String>) -> Self {
        Self {
            data: STANDARD.encode(bytes),
            media_type: media_type.into(),
        }
    }

    /// Accepts either raw base64 or a `data:<type>;base64,<payload>` URL.
    pub fn from_base64(data: &str, media_type: Option<&str>) -> Self {
        let data = strip_data_url(data);
        Self {
            data: data.to_string(),
            media_type: media_type
                .filter(|m| !m.trim().is_empty())
                .unwrap_or(DEFAULT_MEDIA_TYPE)
                .to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.trim().is_empty()
    }
}

/// Drops a `data:...;base64,` prefix if present.
pub fn strip_data_url(data: &str) -> &str {
    match data.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(rest, |(_, payload)| payload),
        None => data,
    }
}

/// Capability the engine needs from the vision backend.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    async fn analyze(
        &self,
        image: &ImagePayload,
        variant: FormVariant,
    ) -> Result<SuggestionSet, GatewayError>;
}
