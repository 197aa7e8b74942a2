//! Inline assets: the profile photo and the resume.
//!
//! A selected file is checked against the asset's accepted type, converted
//! to a `data:` URI on the blocking pool and written to the store. Each
//! asset kind has a single in-flight slot; a second upload of the same kind
//! while one is pending is rejected.

use std::fmt;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use folio_core::mime;
use thiserror::Error;
use tracing::{debug, warn};

use crate::store::{ProfileStore, StoreError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataUriError {
    #[error("missing data: scheme")]
    Scheme,

    #[error("only base64 data URIs are supported")]
    NotBase64,

    #[error("bad base64 payload: {0}")]
    Payload(String),
}

/// A `data:<mime>;base64,<payload>` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    mime: String,
    payload: String,
}

impl DataUri {
    pub fn encode(mime: &str, bytes: &[u8]) -> Self {
        Self {
            mime: mime.to_string(),
            payload: STANDARD.encode(bytes),
        }
    }

    /// Parse the textual form. The payload is checked lazily by [`decode`](Self::decode).
    pub fn parse(raw: &str) -> Result<Self, DataUriError> {
        let rest = raw.strip_prefix("data:").ok_or(DataUriError::Scheme)?;
        let (meta, payload) = rest.split_once(',').ok_or(DataUriError::Scheme)?;
        let meta = meta.strip_suffix(";base64").ok_or(DataUriError::NotBase64)?;
        // Drop parameters such as `;name=cv.pdf`.
        let mime = meta.split(';').next().unwrap_or_default();
        Ok(Self {
            mime: mime.to_string(),
            payload: payload.to_string(),
        })
    }

    pub fn decode(&self) -> Result<Vec<u8>, DataUriError> {
        STANDARD
            .decode(&self.payload)
            .map_err(|e| DataUriError::Payload(e.to_string()))
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Size of the decoded content, without decoding it.
    pub fn decoded_len(&self) -> usize {
        let padding = self.payload.bytes().rev().take_while(|b| *b == b'=').count();
        ((self.payload.len() / 4) * 3).saturating_sub(padding.min(2))
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime, self.payload)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Photo,
    Resume,
}

impl AssetKind {
    /// Photo takes any image; resume takes exactly PDF.
    pub fn accepts(&self, mime: &str) -> bool {
        match self {
            AssetKind::Photo => mime::is_image(mime),
            AssetKind::Resume => mime == mime::PDF,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Photo => "profile photo",
            AssetKind::Resume => "resume",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A file the user picked, with its declared type.
#[derive(Debug, Clone)]
pub struct PendingFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl PendingFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk; the declared type comes from its extension.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime = mime::from_file_name(&file_name).to_string();
        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{kind} must be {expected}, got {mime}")]
    UnsupportedType {
        kind: AssetKind,
        expected: &'static str,
        mime: String,
    },

    #[error("a {0} upload is already in progress")]
    Busy(AssetKind),

    #[error("conversion failed: {0}")]
    Conversion(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Releases an in-flight slot when the upload finishes or fails.
pub(crate) struct SlotGuard<'a>(&'a AtomicBool);

impl Drop for SlotGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs uploads into a [`ProfileStore`].
pub struct Uploader {
    store: ProfileStore,
    photo_slot: AtomicBool,
    resume_slot: AtomicBool,
}

impl Uploader {
    pub fn new(store: ProfileStore) -> Self {
        Self {
            store,
            photo_slot: AtomicBool::new(false),
            resume_slot: AtomicBool::new(false),
        }
    }

    pub(crate) fn claim(&self, kind: AssetKind) -> Result<SlotGuard<'_>, UploadError> {
        let slot = match kind {
            AssetKind::Photo => &self.photo_slot,
            AssetKind::Resume => &self.resume_slot,
        };
        slot.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| UploadError::Busy(kind))?;
        Ok(SlotGuard(slot))
    }

    pub fn is_busy(&self, kind: AssetKind) -> bool {
        match kind {
            AssetKind::Photo => self.photo_slot.load(Ordering::Acquire),
            AssetKind::Resume => self.resume_slot.load(Ordering::Acquire),
        }
    }

    /// Validate, convert and store. On any error the store is unchanged.
    pub async fn upload(&self, kind: AssetKind, file: PendingFile) -> Result<DataUri, UploadError> {
        if !kind.accepts(&file.mime) {
            warn!(%kind, mime = %file.mime, "rejected upload");
            return Err(UploadError::UnsupportedType {
                kind,
                expected: match kind {
                    AssetKind::Photo => "an image",
                    AssetKind::Resume => "a PDF",
                },
                mime: file.mime,
            });
        }

        let _slot = self.claim(kind)?;

        let PendingFile {
            file_name,
            mime,
            bytes,
        } = file;
        let size = bytes.len();
        let uri = tokio::task::spawn_blocking(move || DataUri::encode(&mime, &bytes))
            .await
            .map_err(|e| UploadError::Conversion(e.to_string()))?;

        match kind {
            AssetKind::Photo => self.store.set_photo(&uri)?,
            AssetKind::Resume => self.store.set_resume(&uri, &file_name)?,
        }
        debug!(%kind, file_name = %file_name, size, "upload stored");
        Ok(uri)
    }
}
