//! Document text extraction endpoint
//!
//! `POST /extract` takes a multipart upload in the `file` field and returns
//! `{"text": ...}`, or `{"error": "File type not supported"}` when the file
//! name has no recognised extension.

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use crate::document::DocumentFormat;
use crate::error::{AppError, Result};
use crate::formats;
use crate::state::AppState;

/// Error value returned for unrecognised extensions
pub const UNSUPPORTED_FILE_TYPE: &str = "File type not supported";

/// Create the extract router
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/extract", post(extract_text_from_file))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

/// Extraction response body
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ExtractResponse {
    Text { text: String },
    Unsupported { error: &'static str },
}

/// A file read from the multipart body
struct Upload {
    filename: String,
    data: Vec<u8>,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Upload> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            tracing::debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await?;

        return Ok(Upload {
            filename,
            data: data.to_vec(),
        });
    }

    tracing::warn!("No file field found in multipart upload");
    Err(AppError::BadRequest(
        "No file provided. Use field name 'file'".to_string(),
    ))
}

/// Extract text from an uploaded DOCX, PPTX or PDF
async fn extract_text_from_file(mut multipart: Multipart) -> Result<Json<ExtractResponse>> {
    let Upload { filename, data } = read_upload(&mut multipart).await?;
    tracing::debug!("Received '{}' ({} bytes)", filename, data.len());

    let Some(format) = DocumentFormat::from_filename(&filename) else {
        tracing::debug!("Unsupported file type: '{}'", filename);
        return Ok(Json(ExtractResponse::Unsupported {
            error: UNSUPPORTED_FILE_TYPE,
        }));
    };

    // Parsing is CPU-bound; keep it off the async workers
    let text = tokio::task::spawn_blocking(move || formats::extract_text(format, &data))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    tracing::info!("Extracted {} chars from '{}' as {}", text.len(), filename, format);
    Ok(Json(ExtractResponse::Text { text }))
}
