use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tabula_list::DEFAULT_PAGE_SIZE;

use crate::{DataError, Sector};

pub const SESSION_FILE: &str = "session.json";

/// What the dashboard restores on the next launch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    pub sector: Sector,
    pub page_size: usize,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            sector: Sector::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Project directories shared by the session store and the app config
///
/// # Errors
///
/// Returns [`DataError::NoConfigDir`] when the platform has no home
/// directory to derive them from.
pub fn project_dirs() -> Result<ProjectDirs, DataError> {
    ProjectDirs::from("", "", "tabula").ok_or(DataError::NoConfigDir)
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory
    ///
    /// # Errors
    ///
    /// Fails when no data directory can be determined.
    pub fn default_location() -> Result<Self, DataError> {
        Ok(Self::new(project_dirs()?.data_dir().join(SESSION_FILE)))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the saved session. A missing file yields the default, and so
    /// does an unreadable one, after a warning.
    #[must_use]
    pub fn load(&self) -> Session {
        self.try_load().unwrap_or_default()
    }

    /// The saved session, or `None` when there is no usable one
    #[must_use]
    pub fn try_load(&self) -> Option<Session> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read session");
                return None;
            }
        };

        match serde_json::from_str::<Session>(&json) {
            Ok(mut session) => {
                if session.page_size == 0 {
                    session.page_size = DEFAULT_PAGE_SIZE;
                }
                Some(session)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring corrupt session");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Fails when the directory cannot be created or the file written.
    pub fn save(&self, session: &Session) -> Result<(), DataError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), ?session, "session saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(SESSION_FILE));
        assert_eq!(store.try_load(), None);
        assert_eq!(store.load(), Session::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("nested").join(SESSION_FILE));
        let session = Session {
            sector: Sector::RealEstate,
            page_size: 25,
        };
        store.save(&session).unwrap();
        assert_eq!(store.load(), session);

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"real-estate\""));
    }

    #[test]
    fn test_corrupt_or_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join(SESSION_FILE));

        std::fs::write(store.path(), "{ not json").unwrap();
        assert_eq!(store.try_load(), None);
        assert_eq!(store.load(), Session::default());

        std::fs::write(store.path(), r#"{"sector": "gym"}"#).unwrap();
        assert_eq!(
            store.load(),
            Session {
                sector: Sector::Gym,
                page_size: DEFAULT_PAGE_SIZE
            }
        );

        std::fs::write(store.path(), r#"{"sector": "law", "page_size": 0}"#)
            .unwrap();
        assert_eq!(store.load().page_size, DEFAULT_PAGE_SIZE);
    }
}
