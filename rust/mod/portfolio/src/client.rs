//! HTTP client for the `foliod` API.

use async_trait::async_trait;
use folio_core::{CredentialGate, Decision};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::asset::PendingFile;
use crate::contact::{ContactForwarder, ContactMessage, ForwardError, StoredMessage};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("auth: {0}")]
    Auth(String),

    #[error("decode: {0}")]
    Decode(String),
}

#[derive(Deserialize)]
struct CheckResponse {
    success: bool,
    #[serde(default)]
    token: Option<String>,
}

/// Body of a successful `/api/upload/resume`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub success: bool,
    pub file_name: String,
    pub size: u64,
    pub resume_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct VersionInfo {
    pub name: String,
    pub version: String,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `Ok(Some(token))` on grant, `Ok(None)` on denial.
    pub async fn check_password(&self, password: &str) -> Result<Option<String>, ApiError> {
        let resp = self
            .http
            .post(self.url("/api/auth/check"))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if status == 401 {
            return Ok(None);
        }
        if !resp.status().is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(ApiError::Server { status, message });
        }

        let body: CheckResponse = resp
            .json()
            .await
            .map_err(|e| ApiError::Decode(format!("auth check response: {}", e)))?;
        match (body.success, body.token) {
            (true, Some(token)) => Ok(Some(token)),
            (true, None) => Err(ApiError::Decode("granted without a token".into())),
            (false, _) => Ok(None),
        }
    }

    pub async fn health(&self) -> Result<bool, ApiError> {
        let resp = self.http.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    pub async fn version(&self) -> Result<VersionInfo, ApiError> {
        let resp = self.http.get(self.url("/version")).send().await?;
        Self::decode(resp).await
    }

    /// Upload a resume as the `resume` multipart field.
    pub async fn upload_resume(
        &self,
        token: &str,
        file: &PendingFile,
    ) -> Result<UploadReceipt, ApiError> {
        let part = reqwest::multipart::Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.mime)?;
        let form = reqwest::multipart::Form::new().part("resume", part);

        let resp = self
            .http
            .post(self.url("/api/upload/resume"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        if resp.status().as_u16() == 401 {
            return Err(ApiError::Auth("token rejected by server".into()));
        }
        Self::decode(resp).await
    }

    pub async fn submit_contact(&self, message: &ContactMessage) -> Result<StoredMessage, ApiError> {
        let resp = self
            .http
            .post(self.url("/api/contact"))
            .json(message)
            .send()
            .await?;
        Self::decode(resp).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
                .unwrap_or(body);
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }
        resp.json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ContactForwarder for ApiClient {
    async fn forward(&self, message: &ContactMessage) -> Result<StoredMessage, ForwardError> {
        self.submit_contact(message).await.map_err(|e| match e {
            ApiError::Server { status, message } => ForwardError::Rejected { status, message },
            other => ForwardError::Transport(other.to_string()),
        })
    }
}

/// Credential gate backed by `/api/auth/check`.
pub struct RemoteGate {
    client: ApiClient,
}

impl RemoteGate {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CredentialGate for RemoteGate {
    async fn check(&self, secret: &str) -> Decision {
        match self.client.check_password(secret).await {
            Ok(Some(token)) => Decision::Grant { token },
            Ok(None) => Decision::Deny,
            Err(e) => {
                warn!("auth check against {} failed: {}", self.client.base_url(), e);
                Decision::Deny
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Multipart;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::contact::{ContactForm, Notice};

    async fn check(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        if body["password"] == "admin123" {
            (StatusCode::OK, Json(json!({ "success": true, "token": "tok" })))
        } else {
            (StatusCode::UNAUTHORIZED, Json(json!({ "success": false })))
        }
    }

    async fn contact(Json(m): Json<ContactMessage>) -> (StatusCode, Json<Value>) {
        if m.subject == "reject" {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "code": "VALIDATION_FAILED", "message": "subject: no" })),
            );
        }
        (
            StatusCode::CREATED,
            Json(json!({
                "id": "m1",
                "name": m.name,
                "email": m.email,
                "subject": m.subject,
                "message": m.message,
                "createdAt": "2026-01-01T00:00:00Z",
            })),
        )
    }

    async fn upload(headers: HeaderMap, mut multipart: Multipart) -> (StatusCode, Json<Value>) {
        if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some("Bearer tok") {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "code": "UNAUTHENTICATED" })));
        }
        while let Ok(Some(field)) = multipart.next_field().await {
            if field.name() == Some("resume") {
                let name = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.unwrap();
                return (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "fileName": name,
                        "size": bytes.len(),
                        "resumeUrl": "/resume.pdf",
                    })),
                );
            }
        }
        (StatusCode::BAD_REQUEST, Json(json!({ "message": "missing resume" })))
    }

    async fn serve() -> ApiClient {
        let app = Router::new()
            .route("/health", get(|| async { Json(json!({ "status": "ok" })) }))
            .route(
                "/version",
                get(|| async { Json(json!({ "name": "foliod", "version": "0.1.0" })) }),
            )
            .route("/api/auth/check", post(check))
            .route("/api/contact", post(contact))
            .route("/api/upload/resume", post(upload));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ApiClient::new(format!("http://{}/", addr))
    }

    #[tokio::test]
    async fn remote_gate_grants_and_denies() {
        let client = serve().await;
        let gate = RemoteGate::new(client);
        assert_eq!(
            gate.check("admin123").await,
            Decision::Grant { token: "tok".into() }
        );
        assert_eq!(gate.check("nope").await, Decision::Deny);
    }

    #[tokio::test]
    async fn remote_gate_denies_when_unreachable() {
        // Bind then drop to get a port nobody listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let gate = RemoteGate::new(ApiClient::new(format!("http://{}", addr)));
        assert_eq!(gate.check("admin123").await, Decision::Deny);
    }

    #[tokio::test]
    async fn health_and_version() {
        let client = serve().await;
        assert!(client.health().await.unwrap());
        assert_eq!(client.version().await.unwrap().name, "foliod");
    }

    #[tokio::test]
    async fn contact_form_through_http() {
        let client = serve().await;
        let mut form = ContactForm::new(ContactMessage::new("Jane", "jane@x.com", "Hi", "Hello"));
        assert_eq!(form.submit(&client).await, Notice::Sent);
        assert!(form.is_empty());

        let rejected = ContactMessage::new("Jane", "jane@x.com", "reject", "Hello");
        match client.forward(&rejected).await {
            Err(ForwardError::Rejected { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "subject: no");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn resume_upload_sends_bearer_and_field() {
        let client = serve().await;
        let file = PendingFile::new("cv.pdf", "application/pdf", b"%PDF-1.4".to_vec());

        let receipt = client.upload_resume("tok", &file).await.unwrap();
        assert_eq!(receipt.file_name, "cv.pdf");
        assert_eq!(receipt.size, 8);
        assert_eq!(receipt.resume_url, "/resume.pdf");

        assert!(matches!(
            client.upload_resume("bad", &file).await,
            Err(ApiError::Auth(_))
        ));
    }
}
