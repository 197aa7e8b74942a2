//! Portfolio owner-side logic shared by `folio` and `foliod`.
//!
//! - [`profile`]: the fixed profile record and its compiled-in default.
//! - [`store`]: the local profile store over a durable [`folio_kv::KVStore`].
//! - [`asset`]: data URIs and the guarded upload path for photo and resume.
//! - [`gate`]: the client-side credential gate.
//! - [`session`]: the per-process session context.
//! - [`contact`]: contact form state and the forwarder seam.
//! - [`client`]: HTTP client for the `foliod` API.

pub mod asset;
pub mod client;
pub mod contact;
pub mod gate;
pub mod profile;
pub mod session;
pub mod store;

pub use asset::{AssetKind, DataUri, PendingFile, UploadError, Uploader};
pub use client::{ApiClient, ApiError, RemoteGate, UploadReceipt, VersionInfo};
pub use contact::{ContactForm, ContactForwarder, ContactMessage, ForwardError, Notice, StoredMessage};
pub use gate::{LocalGate, EDIT_SECRET};
pub use profile::{Profile, ProfileError};
pub use session::{Session, SessionError};
pub use store::{AssetRef, ProfileStore, StoreError, StoredResume, DEFAULT_PHOTO_PATH};
