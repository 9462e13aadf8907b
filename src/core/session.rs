//! Session context: the open store plus who is logged in

use super::auth::Authenticator;
use super::document::{CollectionId, Record, TawafRecord};
use super::error::{StoreError, StoreResult};
use super::store::ContentStore;

/// Authentication state of a session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    Anonymous,
    LoggedIn { username: String },
}

/// Everything one user interaction needs, passed explicitly to each operation
#[derive(Debug)]
pub struct Session {
    store: ContentStore,
    auth: AuthState,
}

impl Session {
    /// Start an anonymous session over an open store
    pub fn new(store: ContentStore) -> Self {
        Self {
            store,
            auth: AuthState::Anonymous,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    #[allow(dead_code)]
    pub fn auth(&self) -> &AuthState {
        &self.auth
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth, AuthState::LoggedIn { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match &self.auth {
            AuthState::LoggedIn { username } => Some(username),
            AuthState::Anonymous => None,
        }
    }

    /// Check credentials; on failure the session stays as it was
    pub fn login(
        &mut self,
        authenticator: &dyn Authenticator,
        username: &str,
        password: &str,
    ) -> StoreResult<()> {
        if !authenticator.verify(username, password) {
            tracing::warn!("Rejected login for {:?}", username);
            return Err(StoreError::InvalidCredentials);
        }
        tracing::info!("Logged in as {}", username);
        self.auth = AuthState::LoggedIn {
            username: username.to_string(),
        };
        Ok(())
    }

    pub fn logout(&mut self) {
        if let AuthState::LoggedIn { username } = std::mem::take(&mut self.auth) {
            tracing::info!("Logged out {}", username);
        }
    }

    /// See [`ContentStore::append_record`]; requires a login
    pub fn append_record(
        &mut self,
        collection: CollectionId,
        record: Record,
        audio: Option<&[u8]>,
    ) -> StoreResult<()> {
        self.require_login()?;
        self.store.append_record(collection, record, audio)
    }

    /// See [`ContentStore::set_tawaf_slot`]; requires a login
    pub fn set_tawaf_slot(
        &mut self,
        round: u8,
        record: TawafRecord,
        audio: Option<&[u8]>,
    ) -> StoreResult<()> {
        self.require_login()?;
        self.store.set_tawaf_slot(round, record, audio)
    }

    fn require_login(&self) -> StoreResult<()> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(StoreError::NotAuthenticated)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::PlaceholderAuthenticator;
    use crate::core::document::{Document, DuaRecord, MaqamRecord};

    fn session_in(dir: &tempfile::TempDir) -> Session {
        Session::new(ContentStore::open(dir.path().join("umrah_data.json")).unwrap())
    }

    #[test]
    fn test_anonymous_writes_change_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);

        let dua = session.append_record(
            CollectionId::Travel,
            Record::Dua(DuaRecord::new("a", "b")),
            Some(b"audio"),
        );
        let maqam = session.append_record(
            CollectionId::Maqam,
            Record::Maqam(MaqamRecord::new("x")),
            None,
        );
        let tawaf = session.set_tawaf_slot(1, TawafRecord::new("a", "b"), None);

        for result in [dua, maqam, tawaf] {
            assert!(matches!(result, Err(StoreError::NotAuthenticated)));
        }
        assert_eq!(session.store().document(), &Document::default());
        assert!(!session.store().path().exists());
        assert!(!dir.path().join(crate::core::store::AUDIO_DIR).exists());
    }

    #[test]
    fn test_anonymous_write_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);
        session
            .login(&PlaceholderAuthenticator, "user", "pass")
            .unwrap();
        session
            .append_record(CollectionId::Masjid, Record::Dua(DuaRecord::new("a", "b")), None)
            .unwrap();
        session.logout();

        let before = std::fs::read(session.store().path()).unwrap();
        let result = session.append_record(
            CollectionId::Masjid,
            Record::Dua(DuaRecord::new("c", "d")),
            None,
        );
        assert!(result.is_err());
        assert_eq!(std::fs::read(session.store().path()).unwrap(), before);
    }

    #[test]
    fn test_invalid_credentials_keep_session_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);

        let err = session
            .login(&PlaceholderAuthenticator, "user", "nope")
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        assert_eq!(session.auth(), &AuthState::Anonymous);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_login_enables_writes_until_logout() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = session_in(&dir);

        session
            .login(&PlaceholderAuthenticator, "user", "pass")
            .unwrap();
        assert_eq!(session.username(), Some("user"));
        session
            .set_tawaf_slot(5, TawafRecord::new("a", "b"), None)
            .unwrap();
        assert_eq!(session.store().tawaf().filled(), 1);

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session
            .set_tawaf_slot(5, TawafRecord::new("c", "d"), None)
            .is_err());
        assert_eq!(
            session.store().tawaf().round(5),
            Some(&Some(TawafRecord::new("a", "b")))
        );
    }
}
