//! `POST /api/upload/resume`: owner-only resume replacement.
//!
//! The file arrives as the `resume` field of a multipart body and is kept
//! in the store as a data URI. `/resume.pdf` serves the latest one.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Extension, Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::{mime, ServiceError};
use portfolio::DataUri;
use serde::Serialize;
use tracing::info;

use crate::gate::Claims;
use crate::routes::AppState;

pub const RESUME_URL: &str = "/resume.pdf";
const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "doc", "docx"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub success: bool,
    pub file_name: String,
    pub size: usize,
    pub resume_url: &'static str,
}

fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

fn multipart_err(e: MultipartError) -> ServiceError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServiceError::PayloadTooLarge(e.body_text())
    } else {
        ServiceError::Validation(e.body_text())
    }
}

pub async fn resume_handler(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<UploadResponse>), ServiceError> {
    let mut multipart = multipart.map_err(|e| ServiceError::Validation(e.body_text()))?;

    let _slot = state
        .upload_slot
        .try_lock()
        .map_err(|_| ServiceError::Busy("a resume upload is already in progress".into()))?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await.map_err(multipart_err)? {
        if field.name() != Some("resume") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        if !has_allowed_extension(&file_name) {
            return Err(ServiceError::Validation(
                "Only PDF and Word documents are allowed".into(),
            ));
        }
        let bytes = field.bytes().await.map_err(multipart_err)?;
        upload = Some((file_name, bytes));
        break;
    }
    let (file_name, bytes) =
        upload.ok_or_else(|| ServiceError::Validation("No file uploaded".into()))?;

    let size = bytes.len();
    let store = state.store.clone();
    let name = file_name.clone();
    tokio::task::spawn_blocking(move || {
        let uri = DataUri::encode(mime::from_file_name(&name), &bytes);
        store.set_resume(&uri, &name)
    })
    .await
    .map_err(|e| ServiceError::Internal(e.to_string()))?
    .map_err(|e| ServiceError::Storage(e.to_string()))?;

    info!(file_name = %file_name, size, sid = %claims.sid, "resume replaced");
    Ok((
        StatusCode::OK,
        Json(UploadResponse {
            success: true,
            file_name,
            size,
            resume_url: RESUME_URL,
        }),
    ))
}
