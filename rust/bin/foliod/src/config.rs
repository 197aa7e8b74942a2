//! Server-side configuration, read from `/etc/folio/<name>.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Plain owner password. Ignored when `password_hash` is set.
    #[serde(default)]
    pub password: String,

    /// argon2id PHC string, as printed by `folio hash-password`.
    #[serde(default)]
    pub password_hash: String,

    /// HS256 key for the bearer tokens handed out on login.
    pub token_secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Holds `folio.redb` and `messages.sqlite`.
    pub data_dir: String,

    /// The built site: `index.html`, `profile.jpeg`, `resume.pdf`, `assets/`.
    pub public_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    /// A bare name maps to `/etc/folio/<name>.toml`; anything containing
    /// `/` or `.` is taken as a path.
    pub fn resolve_path(name_or_path: &str) -> PathBuf {
        if name_or_path.contains('/') || name_or_path.contains('.') {
            PathBuf::from(name_or_path)
        } else {
            PathBuf::from(format!("/etc/folio/{}.toml", name_or_path))
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read {}: {}", path.display(), e))?;
        Ok(toml::from_str(&content)?)
    }

    pub fn redb_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join("folio.redb")
    }

    pub fn sqlite_path(&self) -> PathBuf {
        Path::new(&self.storage.data_dir).join("messages.sqlite")
    }
}
