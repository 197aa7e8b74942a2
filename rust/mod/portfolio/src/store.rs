use std::sync::Arc;

use folio_kv::{KVError, KVStore};
use thiserror::Error;
use tracing::{debug, info};

use crate::asset::{DataUri, DataUriError};
use crate::profile::{Profile, ProfileError};

/// Storage keys. These are the names the site has always used, so an
/// exported browser store can be replayed into a local one unchanged.
pub mod keys {
    pub const PROFILE: &str = "portfolioProfile";
    pub const PROFILE_PHOTO: &str = "portfolioProfilePhoto";
    pub const RESUME: &str = "portfolioResume";
    pub const RESUME_FILE_NAME: &str = "portfolioResumeFileName";
    pub const AUTH_TOKEN: &str = "authToken";
}

/// Served when no photo has been uploaded.
pub const DEFAULT_PHOTO_PATH: &str = "/profile.jpeg";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Kv(#[from] KVError),

    #[error(transparent)]
    Profile(#[from] ProfileError),

    #[error("corrupt value under {key}: {reason}")]
    Corrupt { key: &'static str, reason: String },
}

impl StoreError {
    fn corrupt(key: &'static str, e: DataUriError) -> Self {
        StoreError::Corrupt {
            key,
            reason: e.to_string(),
        }
    }
}

/// What the page should show for the profile photo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    Inline(DataUri),
    Default(&'static str),
}

impl AssetRef {
    /// The value for an `src` attribute.
    pub fn src(&self) -> String {
        match self {
            AssetRef::Inline(uri) => uri.to_string(),
            AssetRef::Default(path) => (*path).to_string(),
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, AssetRef::Default(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResume {
    pub data_uri: DataUri,
    pub file_name: Option<String>,
}

/// Local profile store.
///
/// Holds the profile record, the two inline assets and the auth token, each
/// under its own key. Writes replace whole values; nothing here merges. The
/// resume and its file name are always written together.
#[derive(Clone)]
pub struct ProfileStore {
    kv: Arc<dyn KVStore>,
}

impl ProfileStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// The stored profile, or the compiled-in default if none was saved.
    pub fn profile(&self) -> Result<Profile, StoreError> {
        match self.kv.get(keys::PROFILE)? {
            Some(bytes) => Ok(Profile::from_json(&bytes)?),
            None => Ok(Profile::default()),
        }
    }

    /// Whether a profile record has been written, as opposed to the default.
    pub fn has_profile(&self) -> Result<bool, StoreError> {
        Ok(self.kv.get(keys::PROFILE)?.is_some())
    }

    /// Replace the whole profile record.
    pub fn save_profile(&self, profile: &Profile) -> Result<(), StoreError> {
        profile.validate()?;
        let bytes = serde_json::to_vec(profile)
            .map_err(|e| KVError::Serialization(e.to_string()))?;
        self.kv.set(keys::PROFILE, &bytes)?;
        info!(name = %profile.name, "profile saved");
        Ok(())
    }

    pub fn photo(&self) -> Result<AssetRef, StoreError> {
        match self.kv.get_string(keys::PROFILE_PHOTO)? {
            Some(raw) => {
                let uri = DataUri::parse(&raw)
                    .map_err(|e| StoreError::corrupt(keys::PROFILE_PHOTO, e))?;
                Ok(AssetRef::Inline(uri))
            }
            None => Ok(AssetRef::Default(DEFAULT_PHOTO_PATH)),
        }
    }

    pub fn set_photo(&self, uri: &DataUri) -> Result<(), StoreError> {
        self.kv.set(keys::PROFILE_PHOTO, uri.to_string().as_bytes())?;
        debug!(mime = uri.mime(), "profile photo stored");
        Ok(())
    }

    /// Drop the uploaded photo; `photo()` falls back to the default path.
    pub fn remove_photo(&self) -> Result<(), StoreError> {
        self.kv.delete(keys::PROFILE_PHOTO)?;
        debug!("profile photo reset to default");
        Ok(())
    }

    pub fn resume(&self) -> Result<Option<StoredResume>, StoreError> {
        let raw = match self.kv.get_string(keys::RESUME)? {
            Some(raw) => raw,
            None => return Ok(None),
        };
        let data_uri =
            DataUri::parse(&raw).map_err(|e| StoreError::corrupt(keys::RESUME, e))?;
        let file_name = self.kv.get_string(keys::RESUME_FILE_NAME)?;
        Ok(Some(StoredResume {
            data_uri,
            file_name,
        }))
    }

    pub fn set_resume(&self, uri: &DataUri, file_name: &str) -> Result<(), StoreError> {
        let uri = uri.to_string();
        self.kv.batch_set(&[
            (keys::RESUME, uri.as_bytes()),
            (keys::RESUME_FILE_NAME, file_name.as_bytes()),
        ])?;
        debug!(file_name, "resume stored");
        Ok(())
    }

    pub fn token(&self) -> Result<Option<String>, StoreError> {
        Ok(self.kv.get_string(keys::AUTH_TOKEN)?)
    }

    pub fn set_token(&self, token: &str) -> Result<(), StoreError> {
        self.kv.set(keys::AUTH_TOKEN, token.as_bytes())?;
        Ok(())
    }

    pub fn clear_token(&self) -> Result<(), StoreError> {
        self.kv.delete(keys::AUTH_TOKEN)?;
        Ok(())
    }
}
