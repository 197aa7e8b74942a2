//! Bearer-token middleware for owner-only routes.
//!
//! Extracts the token from `Authorization: Bearer <token>`, validates it
//! against the [`TokenGate`](crate::gate::TokenGate) and stores the
//! [`Claims`](crate::gate::Claims) in request extensions for the handler.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use folio_core::ServiceError;

use crate::routes::AppState;

pub async fn require_owner(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ServiceError> {
    let token = extract_bearer(&request)
        .ok_or_else(|| ServiceError::Unauthorized("missing authorization token".into()))?;
    let claims = state.gate.verify(token)?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

fn extract_bearer(request: &Request) -> Option<&str> {
    request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
