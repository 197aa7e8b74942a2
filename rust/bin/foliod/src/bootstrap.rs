//! First-start checks and seeding.
//!
//! When foliod starts:
//! 1. Verify the config can authenticate the owner; if not, refuse to start.
//! 2. Ensure the default profile exists in the store.

use folio_core::{HashedSecret, SecretVerifier, StaticSecret};
use portfolio::{Profile, ProfileStore};
use tracing::info;

use crate::config::ServerConfig;

pub fn verify_config(config: &ServerConfig) -> anyhow::Result<()> {
    if config.auth.password.is_empty() && config.auth.password_hash.is_empty() {
        anyhow::bail!(
            "No owner password in configuration.\n\
             Set [auth] password, or password_hash from `folio hash-password`."
        );
    }
    if !config.auth.password_hash.is_empty() {
        HashedSecret::parse(&config.auth.password_hash)
            .map_err(|e| anyhow::anyhow!("[auth] password_hash: {}", e))?;
    }
    if config.auth.token_secret.is_empty() {
        anyhow::bail!("Token secret is empty in configuration.");
    }
    if config.storage.data_dir.is_empty() {
        anyhow::bail!("Storage data_dir is empty in configuration.");
    }
    if config.storage.public_dir.is_empty() {
        anyhow::bail!("Storage public_dir is empty in configuration.");
    }
    if config.limits.max_upload_bytes == 0 {
        anyhow::bail!("limits.max_upload_bytes must be positive.");
    }
    Ok(())
}

/// The hashed password wins over the plain one.
pub fn build_verifier(config: &ServerConfig) -> anyhow::Result<Box<dyn SecretVerifier>> {
    if config.auth.password_hash.is_empty() {
        Ok(Box::new(StaticSecret::new(config.auth.password.clone())))
    } else {
        let hashed = HashedSecret::parse(&config.auth.password_hash)
            .map_err(|e| anyhow::anyhow!("{}", e))?;
        Ok(Box::new(hashed))
    }
}

/// Write the compiled-in profile if none is stored. Never overwrites.
pub fn ensure_profile_seeded(store: &ProfileStore) -> anyhow::Result<()> {
    if store.has_profile()? {
        info!("profile already present");
        return Ok(());
    }
    store.save_profile(&Profile::default())?;
    info!("seeded default profile");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_kv::MemoryStore;

    use super::*;
    use crate::config::{AuthConfig, LimitsConfig, StorageConfig};

    fn config(password: &str, hash: &str) -> ServerConfig {
        ServerConfig {
            auth: AuthConfig {
                password: password.to_string(),
                password_hash: hash.to_string(),
                token_secret: "secret".to_string(),
            },
            storage: StorageConfig {
                data_dir: "/tmp/folio".to_string(),
                public_dir: "/tmp/folio/public".to_string(),
            },
            limits: LimitsConfig::default(),
        }
    }

    #[test]
    fn refuses_config_without_password() {
        assert!(verify_config(&config("", "")).is_err());
        assert!(verify_config(&config("admin123", "")).is_ok());
    }

    #[test]
    fn refuses_unparseable_hash() {
        assert!(verify_config(&config("", "not-a-hash")).is_err());
    }

    #[test]
    fn refuses_empty_token_secret() {
        let mut c = config("admin123", "");
        c.auth.token_secret.clear();
        assert!(verify_config(&c).is_err());
    }

    #[test]
    fn hash_takes_precedence() {
        let hash = folio_core::hash_secret("hashed-pw").unwrap();
        let v = build_verifier(&config("plain-pw", &hash)).unwrap();
        assert!(v.verify("hashed-pw"));
        assert!(!v.verify("plain-pw"));

        let v = build_verifier(&config("plain-pw", "")).unwrap();
        assert!(v.verify("plain-pw"));
    }

    #[test]
    fn seeding_does_not_overwrite() {
        let store = ProfileStore::new(Arc::new(MemoryStore::new()));
        ensure_profile_seeded(&store).unwrap();
        assert!(store.has_profile().unwrap());

        let mut edited = Profile::default();
        edited.title = "Edited".into();
        store.save_profile(&edited).unwrap();
        ensure_profile_seeded(&store).unwrap();
        assert_eq!(store.profile().unwrap().title, "Edited");
    }
}
