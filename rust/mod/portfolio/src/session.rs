use folio_core::{CredentialGate, Decision};
use thiserror::Error;
use tracing::info;

use crate::asset::{AssetKind, DataUri, PendingFile, UploadError, Uploader};
use crate::profile::{Profile, ProfileError};
use crate::store::{AssetRef, ProfileStore, StoreError, StoredResume};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("editing is locked; log in first")]
    Locked,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Profile(#[from] ProfileError),
}

/// Per-process session context.
///
/// Built once at startup from the local store and passed to whatever needs
/// the authenticated flag or the profile snapshot. All state changes go
/// through its methods, which write through to the store.
pub struct Session {
    store: ProfileStore,
    uploader: Uploader,
    token: Option<String>,
    profile: Profile,
}

impl Session {
    /// Read the token and profile snapshot. A stored token means
    /// authenticated; nothing checks it further.
    pub fn load(store: ProfileStore) -> Result<Self, StoreError> {
        let token = store.token()?;
        let profile = store.profile()?;
        Ok(Self {
            uploader: Uploader::new(store.clone()),
            store,
            token,
            profile,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// Ask the gate; on grant persist the token. Returns whether editing is
    /// now unlocked.
    pub async fn login(
        &mut self,
        gate: &dyn CredentialGate,
        secret: &str,
    ) -> Result<bool, StoreError> {
        if self.is_authenticated() {
            return Ok(true);
        }
        match gate.check(secret).await {
            Decision::Grant { token } => {
                self.store.set_token(&token)?;
                self.token = Some(token);
                info!("session authenticated");
                Ok(true)
            }
            Decision::Deny => Ok(false),
        }
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.store.clear_token()?;
        self.token = None;
        info!("session cleared");
        Ok(())
    }

    fn ensure_unlocked(&self) -> Result<(), SessionError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(SessionError::Locked)
        }
    }

    /// Replace the whole profile. Callers merge field edits into a copy of
    /// [`profile`](Self::profile) first.
    pub fn save_profile(&mut self, profile: Profile) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.store.save_profile(&profile)?;
        self.profile = profile;
        Ok(())
    }

    pub fn photo(&self) -> Result<AssetRef, StoreError> {
        self.store.photo()
    }

    pub fn resume(&self) -> Result<Option<StoredResume>, StoreError> {
        self.store.resume()
    }

    pub async fn upload_photo(&self, file: PendingFile) -> Result<DataUri, SessionError> {
        self.ensure_unlocked()?;
        Ok(self.uploader.upload(AssetKind::Photo, file).await?)
    }

    pub fn remove_photo(&self) -> Result<(), SessionError> {
        self.ensure_unlocked()?;
        self.store.remove_photo()?;
        Ok(())
    }

    pub async fn upload_resume(&self, file: PendingFile) -> Result<DataUri, SessionError> {
        self.ensure_unlocked()?;
        Ok(self.uploader.upload(AssetKind::Resume, file).await?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use folio_kv::MemoryStore;

    use super::*;
    use crate::gate::{LocalGate, EDIT_SECRET};

    fn fresh() -> (ProfileStore, Session) {
        let store = ProfileStore::new(Arc::new(MemoryStore::new()));
        let session = Session::load(store.clone()).unwrap();
        (store, session)
    }

    #[tokio::test]
    async fn login_persists_token() {
        let (store, mut session) = fresh();
        assert!(!session.is_authenticated());

        assert!(!session.login(&LocalGate::new(), "wrong").await.unwrap());
        assert_eq!(store.token().unwrap(), None);

        assert!(session.login(&LocalGate::new(), EDIT_SECRET).await.unwrap());
        assert!(session.is_authenticated());
        assert_eq!(store.token().unwrap().as_deref(), session.token());

        // A new session over the same store starts authenticated.
        let reloaded = Session::load(store.clone()).unwrap();
        assert!(reloaded.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_token() {
        let (store, mut session) = fresh();
        session.login(&LocalGate::new(), EDIT_SECRET).await.unwrap();
        session.logout().unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(store.token().unwrap(), None);
    }

    #[tokio::test]
    async fn edits_require_authentication() {
        let (store, mut session) = fresh();
        let mut p = session.profile().clone();
        p.title = "Backend Developer".into();

        assert!(matches!(
            session.save_profile(p.clone()),
            Err(SessionError::Locked)
        ));
        assert!(matches!(session.remove_photo(), Err(SessionError::Locked)));
        let photo = PendingFile::new("me.png", "image/png", vec![0u8; 8]);
        assert!(matches!(
            session.upload_photo(photo).await,
            Err(SessionError::Locked)
        ));
        assert_eq!(store.profile().unwrap(), Profile::default());

        session.login(&LocalGate::new(), EDIT_SECRET).await.unwrap();
        session.save_profile(p.clone()).unwrap();
        assert_eq!(session.profile(), &p);
        assert_eq!(store.profile().unwrap(), p);
    }

    #[tokio::test]
    async fn photo_upload_and_reset() {
        let (_store, mut session) = fresh();
        session.login(&LocalGate::new(), EDIT_SECRET).await.unwrap();

        let bytes = vec![0xff, 0xd8, 0xff, 0xe0];
        session
            .upload_photo(PendingFile::new("me.jpg", "image/jpeg", bytes.clone()))
            .await
            .unwrap();
        match session.photo().unwrap() {
            AssetRef::Inline(uri) => assert_eq!(uri.decode().unwrap(), bytes),
            other => panic!("unexpected {:?}", other),
        }

        session.remove_photo().unwrap();
        assert!(session.photo().unwrap().is_default());
    }

    #[tokio::test]
    async fn resume_upload_keeps_previous_on_rejection() {
        let (_store, mut session) = fresh();
        session.login(&LocalGate::new(), EDIT_SECRET).await.unwrap();
        assert_eq!(session.resume().unwrap(), None);

        let txt = PendingFile::new("cv.txt", "text/plain", b"hello".to_vec());
        assert!(matches!(
            session.upload_resume(txt).await,
            Err(SessionError::Upload(UploadError::UnsupportedType { .. }))
        ));
        assert_eq!(session.resume().unwrap(), None);
    }
}
