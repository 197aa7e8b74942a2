use async_trait::async_trait;
use folio_core::{new_id, CredentialGate, Decision, SecretVerifier, StaticSecret};
use tracing::{info, warn};

/// The compiled-in owner password the offline client checks against.
///
/// Demo-grade: anyone with the binary can read it. Deployments that need
/// more should log in through `foliod` instead.
pub const EDIT_SECRET: &str = "admin123";

/// Client-side gate. Grants with a freshly generated opaque token.
pub struct LocalGate {
    verifier: Box<dyn SecretVerifier>,
}

impl LocalGate {
    pub fn new() -> Self {
        Self::with_verifier(Box::new(StaticSecret::new(EDIT_SECRET)))
    }

    pub fn with_verifier(verifier: Box<dyn SecretVerifier>) -> Self {
        Self { verifier }
    }
}

impl Default for LocalGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialGate for LocalGate {
    async fn check(&self, secret: &str) -> Decision {
        if self.verifier.verify(secret) {
            info!("local credential check granted");
            Decision::Grant { token: new_id() }
        } else {
            warn!("local credential check denied");
            Decision::Deny
        }
    }
}
