//! Server-side credential gate: verifies the owner password and issues
//! HS256 bearer tokens.

use async_trait::async_trait;
use folio_core::{new_id, CredentialGate, Decision, SecretVerifier, ServiceError};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

pub const OWNER_SUBJECT: &str = "owner";

/// Token payload. There is no `exp`; a token stays valid until the
/// token secret changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    /// Session id.
    pub sid: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
}

pub struct TokenGate {
    verifier: Box<dyn SecretVerifier>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenGate {
    pub fn new(verifier: Box<dyn SecretVerifier>, token_secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims.clear();
        Self {
            verifier,
            encoding_key: EncodingKey::from_secret(token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(token_secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self) -> Result<String, ServiceError> {
        let claims = Claims {
            sub: OWNER_SUBJECT.to_string(),
            sid: new_id(),
            iat: chrono::Utc::now().timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| ServiceError::Internal(format!("failed to encode token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| ServiceError::Unauthorized(format!("invalid token: {}", e)))?;
        if data.claims.sub != OWNER_SUBJECT {
            return Err(ServiceError::Unauthorized("invalid token subject".into()));
        }
        Ok(data.claims)
    }
}

#[async_trait]
impl CredentialGate for TokenGate {
    async fn check(&self, secret: &str) -> Decision {
        if !self.verifier.verify(secret) {
            warn!("owner login denied");
            return Decision::Deny;
        }
        match self.issue() {
            Ok(token) => {
                info!("owner login granted");
                Decision::Grant { token }
            }
            Err(e) => {
                error!("{}", e);
                Decision::Deny
            }
        }
    }
}
