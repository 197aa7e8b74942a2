//! `POST /api/contact`: validates and records a contact message.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use folio_core::ServiceError;
use portfolio::{ContactMessage, StoredMessage};

use crate::routes::AppState;

pub async fn submit_handler(
    State(state): State<AppState>,
    body: Result<Json<ContactMessage>, JsonRejection>,
) -> Result<(StatusCode, Json<StoredMessage>), ServiceError> {
    let Json(msg) = body.map_err(|e| ServiceError::Validation(e.body_text()))?;
    msg.validate()
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

    let messages = state.messages.clone();
    let stored = tokio::task::spawn_blocking(move || messages.insert(&msg))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))??;
    Ok((StatusCode::CREATED, Json(stored)))
}
