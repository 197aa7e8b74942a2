//! Credential gate.
//!
//! Callers never compare secrets themselves. They hold a [`CredentialGate`]
//! and act on the [`Decision`] it returns. The comparison itself sits behind
//! [`SecretVerifier`], so the plain reference value can be swapped for a
//! hashed one without touching any caller.
//!
//! The plain comparison is demo-grade: no hashing, no rate limiting, no
//! lockout.

use async_trait::async_trait;

use crate::ServiceError;

/// Outcome of a credential check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The secret matched. `token` is an opaque bearer credential.
    Grant { token: String },
    Deny,
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Grant { .. })
    }

    pub fn token(&self) -> Option<&str> {
        match self {
            Decision::Grant { token } => Some(token),
            Decision::Deny => None,
        }
    }
}

/// Compares a presented secret against the configured reference.
pub trait SecretVerifier: Send + Sync + 'static {
    fn verify(&self, secret: &str) -> bool;
}

/// Exact, case-sensitive equality against one reference string.
pub struct StaticSecret {
    reference: String,
}

impl StaticSecret {
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl SecretVerifier for StaticSecret {
    fn verify(&self, secret: &str) -> bool {
        secret == self.reference
    }
}

/// Verifies against an argon2id PHC string (`$argon2id$v=19$...`).
pub struct HashedSecret {
    hash: String,
}

impl HashedSecret {
    /// Wrap a PHC hash string. Fails if the string does not parse.
    pub fn parse(hash: &str) -> Result<Self, ServiceError> {
        password_hash::PasswordHash::new(hash)
            .map_err(|e| ServiceError::Internal(format!("invalid password hash: {}", e)))?;
        Ok(Self {
            hash: hash.to_string(),
        })
    }
}

impl SecretVerifier for HashedSecret {
    fn verify(&self, secret: &str) -> bool {
        use argon2::Argon2;
        use password_hash::{PasswordHash, PasswordVerifier};

        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(secret.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }
}

/// Hash a secret with argon2id and a random salt.
pub fn hash_secret(secret: &str) -> Result<String, ServiceError> {
    use argon2::Argon2;
    use password_hash::rand_core::OsRng;
    use password_hash::{PasswordHasher, SaltString};

    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| ServiceError::Internal(format!("failed to hash password: {}", e)))
}

/// Accepts a plaintext secret and decides whether to unlock editing.
///
/// Implementations exist for the compiled-in client constant, for the
/// remote `/api/auth/check` endpoint and for the server itself.
#[async_trait]
pub trait CredentialGate: Send + Sync {
    async fn check(&self, secret: &str) -> Decision;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_secret_is_exact_and_case_sensitive() {
        let v = StaticSecret::new("admin123");
        assert!(v.verify("admin123"));
        assert!(!v.verify("Admin123"));
        assert!(!v.verify("admin123 "));
        assert!(!v.verify(""));
    }

    #[test]
    fn hashed_secret_roundtrip() {
        let hash = hash_secret("s3cret").unwrap();
        let v = HashedSecret::parse(&hash).unwrap();
        assert!(v.verify("s3cret"));
        assert!(!v.verify("S3cret"));
    }

    #[test]
    fn hashed_secret_rejects_garbage_hash() {
        assert!(HashedSecret::parse("not-a-hash").is_err());
    }

    #[test]
    fn decision_accessors() {
        let grant = Decision::Grant { token: "t".into() };
        assert!(grant.is_granted());
        assert_eq!(grant.token(), Some("t"));
        assert!(!Decision::Deny.is_granted());
        assert_eq!(Decision::Deny.token(), None);
    }
}
