use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

use uuid::Uuid;

use crate::domain::auth::user::PublicUser;

use super::error::ClientError;

#[derive(Clone, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct StoredSession {
    pub token: Uuid,
    pub user: PublicUser,
}

/// Holds the bearer token and its user for the lifetime of an
/// [`super::api::ApiClient`], mirrored to disk as JSON so a restart
/// resumes the same session.
///
/// Whether the token is still honored is the server's call;
/// `ApiClient::init` probes it once at startup and discards it on a 401.
pub struct SessionContext {
    path: PathBuf,
    session: RwLock<Option<StoredSession>>,
}

impl SessionContext {
    /// Loads whatever session the previous run left behind. A missing or
    /// garbled file is a logged-out state, not an error.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let session = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok());

        Self {
            path,
            session: RwLock::new(session),
        }
    }

    pub fn token(&self) -> Option<Uuid> {
        self.read().as_ref().map(|s| s.token)
    }

    pub fn user(&self) -> Option<PublicUser> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().is_some()
    }

    pub fn set(&self, token: Uuid, user: PublicUser) -> Result<(), ClientError> {
        let stored = StoredSession { token, user };
        std::fs::write(&self.path, serde_json::to_string(&stored)?)?;
        *self.write() = Some(stored);
        Ok(())
    }

    pub fn clear(&self) -> Result<(), ClientError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        *self.write() = None;
        Ok(())
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Option<StoredSession>> {
        self.session
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Option<StoredSession>> {
        self.session
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn a_user() -> PublicUser {
        PublicUser {
            id: 7,
            username: "reader_1".to_string(),
            email: "reader@example.com".to_string(),
            avatar: None,
            bio: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn session_survives_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = SessionContext::load(&path);
        assert!(!session.is_logged_in());

        let token = Uuid::new_v4();
        session.set(token, a_user()).unwrap();

        let reloaded = SessionContext::load(&path);
        assert_eq!(reloaded.token(), Some(token));
        assert_eq!(reloaded.user().map(|u| u.username), Some("reader_1".to_string()));
    }

    #[test]
    fn clear_removes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let session = SessionContext::load(&path);
        session.set(Uuid::new_v4(), a_user()).unwrap();
        session.clear().unwrap();

        assert!(!path.exists());
        assert!(!SessionContext::load(&path).is_logged_in());
    }

    #[test]
    fn garbage_on_disk_means_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(!SessionContext::load(&path).is_logged_in());
    }
}
