//! `POST /api/auth/check`: verifies the owner password and issues a token.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use folio_core::{CredentialGate, Decision};
use serde::Deserialize;

use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub password: String,
}

pub async fn check_handler(
    State(state): State<AppState>,
    body: Result<Json<CheckRequest>, JsonRejection>,
) -> Response {
    // A body we cannot read is a wrong password as far as the caller knows.
    let password = match body {
        Ok(Json(req)) => req.password,
        Err(_) => String::new(),
    };
    match state.gate.check(&password).await {
        Decision::Grant { token } => (
            StatusCode::OK,
            Json(serde_json::json!({ "success": true, "token": token })),
        )
            .into_response(),
        Decision::Deny => (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "success": false })),
        )
            .into_response(),
    }
}
