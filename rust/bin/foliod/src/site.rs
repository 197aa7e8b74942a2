//! The built site: fixed documents, hashed assets and the profile snapshot.

use std::path::{Component, Path, PathBuf};

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::{mime, ServiceError};
use tracing::debug;

use crate::routes::AppState;
use crate::upload::RESUME_URL;

fn file_response(content_type: &str, bytes: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, content_type.to_string())], bytes).into_response()
}

pub fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

async fn read_public(state: &AppState, relative: &Path) -> Option<Vec<u8>> {
    let path = Path::new(&state.config.storage.public_dir).join(relative);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            debug!(path = %path.display(), "static file unavailable: {}", e);
            None
        }
    }
}

async fn serve_public(state: &AppState, relative: &str, content_type: &str) -> Response {
    match read_public(state, Path::new(relative)).await {
        Some(bytes) => file_response(content_type, bytes),
        None => not_found(),
    }
}

pub async fn index(State(state): State<AppState>) -> Response {
    serve_public(&state, "index.html", mime::HTML).await
}

pub async fn profile_photo(State(state): State<AppState>) -> Response {
    serve_public(&state, "profile.jpeg", mime::JPEG).await
}

/// The last uploaded resume, else the one shipped with the site.
pub async fn resume(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let stored = state
        .store
        .resume()
        .map_err(|e| ServiceError::Storage(e.to_string()))?;
    if let Some(resume) = stored {
        let bytes = resume
            .data_uri
            .decode()
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        return Ok(file_response(mime::PDF, bytes));
    }
    Ok(serve_public(&state, "resume.pdf", mime::PDF).await)
}

/// Only plain relative components; anything else could leave the public dir.
fn asset_path(raw: &str) -> Option<PathBuf> {
    let path = Path::new(raw);
    if raw.is_empty() || path.components().any(|c| !matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(Path::new("assets").join(path))
}

/// Hashed build assets. Served by hand rather than through `ServeDir`
/// because the content type is fixed: `text/css` for stylesheets and
/// `application/javascript` for everything else under `/assets`.
pub async fn asset(State(state): State<AppState>, UrlPath(raw): UrlPath<String>) -> Response {
    let Some(relative) = asset_path(&raw) else {
        return not_found();
    };
    let content_type = if raw.ends_with(".css") {
        mime::CSS
    } else {
        mime::JAVASCRIPT
    };
    match read_public(&state, &relative).await {
        Some(bytes) => file_response(content_type, bytes),
        None => not_found(),
    }
}

pub async fn fallback() -> Response {
    not_found()
}

/// `GET /api/profile`: the stored profile plus where to fetch its media.
pub async fn profile(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ServiceError> {
    let storage = |e: portfolio::StoreError| ServiceError::Storage(e.to_string());
    let profile = state.store.profile().map_err(storage)?;
    let photo = state.store.photo().map_err(storage)?;
    let has_resume = state.store.resume().map_err(storage)?.is_some()
        || Path::new(&state.config.storage.public_dir)
            .join("resume.pdf")
            .is_file();

    let mut body =
        serde_json::to_value(&profile).map_err(|e| ServiceError::Internal(e.to_string()))?;
    body["profilePhoto"] = photo.src().into();
    body["resumeUrl"] = if has_resume {
        RESUME_URL.into()
    } else {
        serde_json::Value::Null
    };
    Ok(Json(body))
}
