use axum::{
    extract::{rejection::JsonRejection, Multipart, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::builder::assembler::assemble;
use crate::builder::enhance::enhance_context;
use crate::builder::export::{download_filename, titled_preview};
use crate::builder::fields::{FormVariant, PromptFields};
use crate::builder::session::BuilderSession;
use crate::builder::suggestions::Category;
use crate::builder::upload::UploadedFile;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AssembleRequest {
    #[serde(default)]
    pub variant: FormVariant,
    #[serde(default)]
    pub fields: PromptFields,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Serialize)]
pub struct AssembleResponse {
    pub prompt: String,
    pub preview: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub session: BuilderSession,
    pub category: Category,
    pub index: usize,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session: BuilderSession,
    pub prompt: String,
}

impl From<BuilderSession> for SessionResponse {
    fn from(session: BuilderSession) -> Self {
        let prompt = session.render();
        Self { session, prompt }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct EnhanceBody {
    pub text: String,
}

/// POST /api/v1/prompt/assemble
pub async fn handle_assemble(
    payload: Result<Json<AssembleRequest>, JsonRejection>,
) -> Result<Json<AssembleResponse>, AppError> {
    let Json(req) = payload?;
    let prompt = assemble(req.variant, &req.fields);
    let preview = titled_preview(&req.title, &prompt);
    Ok(Json(AssembleResponse { prompt, preview }))
}

/// POST /api/v1/prompt/toggle
///
/// The client-sent session is resynced against its own fields first. An out-of-range
/// index, or a category the variant does not have, then leaves it untouched.
pub async fn handle_toggle(
    payload: Result<Json<ToggleRequest>, JsonRejection>,
) -> Result<Json<SessionResponse>, AppError> {
    let Json(req) = payload?;
    let mut session = req.session;
    session.resync_all();
    if !session.toggle_suggestion(req.category, req.index) {
        debug!(
            "Ignoring toggle of {:?}[{}] on {:?} session",
            req.category, req.index, session.variant
        );
    }
    Ok(Json(session.into()))
}

/// POST /api/v1/prompt/upload
///
/// Multipart: an optional `session` part (JSON) and any number of `file` parts. The first
/// image is analyzed; a failed analysis still answers 200 with an idle session.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SessionResponse>, AppError> {
    let mut session = BuilderSession::default();
    let mut files = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("session") => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable session part: {e}")))?;
                session = serde_json::from_str(&raw)
                    .map_err(|e| AppError::Validation(format!("Invalid session: {e}")))?;
                session.resync_all();
            }
            Some("file") => {
                let name = field.file_name().unwrap_or_default().to_string();
                let media_type = field.content_type().map(String::from);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Unreadable file part: {e}")))?;
                files.push(UploadedFile {
                    name,
                    media_type,
                    bytes,
                });
            }
            _ => {}
        }
    }

    session.upload_files(files, state.analyzer.as_ref()).await;
    Ok(Json(session.into()))
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    #[serde(default)]
    pub variant: FormVariant,
    #[serde(default)]
    pub fields: PromptFields,
    #[serde(default)]
    pub title: String,
}

/// POST /api/v1/prompt/download
pub async fn handle_download(
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload?;
    let filename = download_filename(&req.title, req.variant);
    let body = assemble(req.variant, &req.fields);
    Ok((
        [
            (CONTENT_TYPE, req.variant.content_type().to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    ))
}

/// POST /api/v1/prompt/enhance
pub async fn handle_enhance(
    payload: Result<Json<EnhanceBody>, JsonRejection>,
) -> Result<Json<EnhanceBody>, AppError> {
    let Json(req) = payload?;
    Ok(Json(EnhanceBody {
        text: enhance_context(&req.text),
    }))
}
