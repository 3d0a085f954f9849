//! Session payload persisted as a JSON file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use cap_std::{ambient_authority, fs::Dir};
use tracing::debug;

use crate::domain::StoredSession;
use crate::domain::ports::{SessionStore, SessionStoreError};

/// [`SessionStore`] keeping the payload in a single file.
///
/// The parent directory is created on open. Writes go through a temporary
/// sibling and a rename.
#[derive(Debug)]
pub struct FileSessionStore {
    dir: Dir,
    file_name: PathBuf,
}

impl FileSessionStore {
    /// Open the session file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStoreError::Io`] when `path` has no file name or its
    /// parent directory cannot be created or opened.
    pub fn open(path: &Path) -> Result<Self, SessionStoreError> {
        let file_name = path
            .file_name()
            .map(PathBuf::from)
            .ok_or_else(|| SessionStoreError::io(format!("{} has no file name", path.display())))?;
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let dir = Dir::create_ambient_dir_all(parent, ambient_authority())
            .and_then(|()| Dir::open_ambient_dir(parent, ambient_authority()))
            .map_err(|err| SessionStoreError::io(format!("{}: {err}", parent.display())))?;
        Ok(Self { dir, file_name })
    }

    fn staging_name(&self) -> PathBuf {
        let mut name = self.file_name.clone().into_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredSession>, SessionStoreError> {
        let contents = match self.dir.read_to_string(&self.file_name) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(SessionStoreError::io(err.to_string())),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| SessionStoreError::corrupt(err.to_string()))
    }

    async fn save(&self, session: &StoredSession) -> Result<(), SessionStoreError> {
        let contents = serde_json::to_vec(session)
            .map_err(|err| SessionStoreError::io(format!("serialise session: {err}")))?;
        let staging = self.staging_name();
        self.dir
            .write(&staging, contents)
            .and_then(|()| self.dir.rename(&staging, &self.dir, &self.file_name))
            .map_err(|err| SessionStoreError::io(err.to_string()))?;
        debug!(expires_at = session.expires_at, "session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        match self.dir.remove_file(&self.file_name) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(SessionStoreError::io(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::registry::admin_user;
    use chrono::{TimeZone, Utc};
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn session_dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn session() -> StoredSession {
        let now = Utc
            .with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
            .single()
            .expect("valid timestamp");
        StoredSession::starting_at(admin_user("a-1", "admin"), now)
    }

    #[rstest]
    #[tokio::test]
    async fn saved_session_loads_back(session_dir: TempDir) {
        let path = session_dir.path().join("state").join("session.json");
        let store = FileSessionStore::open(&path).expect("open store");

        store.save(&session()).await.expect("save");
        let reopened = FileSessionStore::open(&path).expect("reopen store");

        assert_eq!(reopened.load().await.expect("load"), Some(session()));
    }

    #[rstest]
    #[tokio::test]
    async fn clear_is_idempotent(session_dir: TempDir) {
        let store =
            FileSessionStore::open(&session_dir.path().join("session.json")).expect("open store");
        store.save(&session()).await.expect("save");

        store.clear().await.expect("first clear");
        store.clear().await.expect("second clear");

        assert_eq!(store.load().await.expect("load"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn unreadable_payload_is_corrupt(session_dir: TempDir) {
        let path = session_dir.path().join("session.json");
        let store = FileSessionStore::open(&path).expect("open store");
        Dir::open_ambient_dir(session_dir.path(), ambient_authority())
            .and_then(|dir| dir.write("session.json", "{\"user\":"))
            .expect("write corrupt payload");

        let error = store.load().await.expect_err("corrupt payload");

        assert!(matches!(error, SessionStoreError::Corrupt { .. }));
    }
}
