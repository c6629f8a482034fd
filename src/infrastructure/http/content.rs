use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::application::services::ContentService;
use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::http::error::{ApiError, Envelope};

#[derive(Debug, Serialize, Deserialize)]
pub struct ContentBody {
    pub content: String,
}

/// `GET /api/content`
pub async fn get_content(
    State(content): State<Arc<ContentService>>,
) -> Result<Json<ContentBody>, ApiError> {
    let html = content.get().map_err(|e| {
        error!("load content: {}", e);
        ApiError::Internal("Failed to load content".into())
    })?;
    Ok(Json(ContentBody { content: html }))
}

/// `POST /api/content`
///
/// The body is parsed by hand so that a non-JSON body is reported as a
/// server failure while a non-string `content` is a bad request.
pub async fn save_content(
    State(content): State<Arc<ContentService>>,
    body: Bytes,
) -> Result<Json<Envelope>, ApiError> {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        error!("parse content request: {}", e);
        ApiError::Internal("Failed to save content".into())
    })?;

    content.update(&payload).map_err(|e| match e {
        ApplicationError::Domain(DomainError::InvalidContent(msg)) => ApiError::BadRequest(msg),
        other => {
            error!("save content: {}", other);
            ApiError::Internal("Failed to save content".into())
        }
    })?;

    Ok(Json(Envelope::ok()))
}
