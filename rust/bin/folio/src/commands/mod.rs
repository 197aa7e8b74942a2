//! Subcommand implementations. Each writes its user-facing output to `out`.

pub mod contact;
pub mod login;
pub mod photo;
pub mod profile;
pub mod resume;
pub mod status;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use folio_kv::{KVError, RedbStore};
use portfolio::{ApiClient, ProfileStore, Session};
use tracing::debug;

use crate::config::ClientConfig;

/// How long a command waits for another `folio` process to finish with the
/// store before giving up.
const STORE_LOCK_WAIT: Duration = Duration::from_secs(10);

/// Open the local store and build the process-wide session.
pub fn open_session(config: &ClientConfig) -> Result<Session> {
    open_session_waiting(config, STORE_LOCK_WAIT)
}

fn open_session_waiting(config: &ClientConfig, wait: Duration) -> Result<Session> {
    let path = config.store_path();
    debug!(path = %path.display(), "opening local store");
    let kv = RedbStore::open_waiting(&path, wait).map_err(|e| match e {
        KVError::Busy(_) => anyhow::anyhow!(
            "{} is in use by another folio command; try again when it finishes",
            path.display()
        ),
        e => anyhow::anyhow!("failed to open {}: {}", path.display(), e),
    })?;
    Ok(Session::load(ProfileStore::new(Arc::new(kv)))?)
}

pub fn api_client(config: &ClientConfig) -> Result<ApiClient> {
    let server = config.server().ok_or_else(|| {
        anyhow::anyhow!("No server configured. Run `folio config --server <url>`.")
    })?;
    Ok(ApiClient::new(server))
}

/// Human-readable byte count.
pub fn format_size(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MiB", bytes as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Arc;

    use folio_kv::MemoryStore;
    use portfolio::{LocalGate, ProfileStore, Session, EDIT_SECRET};

    pub fn session() -> Session {
        Session::load(ProfileStore::new(Arc::new(MemoryStore::new()))).unwrap()
    }

    pub async fn unlocked() -> Session {
        let mut s = session();
        assert!(s.login(&LocalGate::new(), EDIT_SECRET).await.unwrap());
        s
    }

    pub fn text(out: Vec<u8>) -> String {
        String::from_utf8(out).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes() {
        assert_eq!(format_size(12), "12 B");
        assert_eq!(format_size(2048), "2.0 KiB");
        assert_eq!(format_size(3 * 1024 * 1024), "3.0 MiB");
    }

    #[test]
    fn busy_store_reports_other_command() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = ClientConfig {
            server: String::new(),
            store_path: tmp.path().join("local.redb").display().to_string(),
        };
        let _first = open_session(&config).unwrap();

        let err = open_session_waiting(&config, Duration::from_millis(100))
            .err()
            .unwrap()
            .to_string();
        assert!(err.contains("in use by another folio command"), "{}", err);
    }

    #[test]
    fn session_opens_once_store_is_released() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = ClientConfig {
            server: String::new(),
            store_path: tmp.path().join("local.redb").display().to_string(),
        };
        drop(open_session(&config).unwrap());
        assert!(open_session_waiting(&config, Duration::from_millis(100)).is_ok());
    }

    #[test]
    fn offline_config_has_no_client() {
        assert!(api_client(&ClientConfig::default()).is_err());
    }
}
