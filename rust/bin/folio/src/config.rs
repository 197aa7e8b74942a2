//! Client-side configuration.
//!
//! Reads/writes `~/.folio/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// foliod URL (e.g. "http://localhost:5000"). Empty means offline:
    /// login checks the compiled-in secret and `contact` is unavailable.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub server: String,

    /// Local store file. Defaults to `~/.folio/local.redb`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub store_path: String,
}

impl ClientConfig {
    /// Default config file path: ~/.folio/config.toml.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    /// Load config from disk, or return default if file doesn't exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn store_path(&self) -> PathBuf {
        if self.store_path.is_empty() {
            dirs_path().join("local.redb")
        } else {
            PathBuf::from(&self.store_path)
        }
    }

    pub fn server(&self) -> Option<&str> {
        let s = self.server.trim();
        (!s.is_empty()).then_some(s)
    }
}

/// Return the folio config directory (~/.folio).
fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".folio")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_default() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = ClientConfig::load(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.server(), None);
        assert!(config.store_path().ends_with(".folio/local.redb"));
    }

    #[test]
    fn save_then_load() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("nested/config.toml");
        let config = ClientConfig {
            server: "http://localhost:5000".into(),
            store_path: "/tmp/folio.redb".into(),
        };
        config.save(&path).unwrap();

        let back = ClientConfig::load(&path).unwrap();
        assert_eq!(back, config);
        assert_eq!(back.server(), Some("http://localhost:5000"));
        assert_eq!(back.store_path(), PathBuf::from("/tmp/folio.redb"));
    }
}
