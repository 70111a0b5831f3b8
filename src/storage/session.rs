//! Session storage
//!
//! The session file remembers the logged-in student, the auth token and
//! the bucket view-model state, so an unsaved priority reorder survives
//! between command invocations.

use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Student;
use crate::sync::SyncState;

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Not logged in. Run 'regsim login' first.")]
    NotLoggedIn,

    #[error("Session file is corrupt: {0}")]
    Corrupt(PathBuf),
}

/// Persisted client state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub student: Option<Student>,

    #[serde(default)]
    pub token: Option<String>,

    #[serde(default)]
    pub buckets: SyncState,
}

impl Session {
    /// Returns the logged-in student
    pub fn require_student(&self) -> Result<&Student, SessionError> {
        self.student.as_ref().ok_or(SessionError::NotLoggedIn)
    }

    /// Forgets the student, the token and any cached bucket state
    pub fn logout(&mut self) {
        *self = Session::default();
    }
}

/// Store for the session file
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store inside a home directory
    pub fn for_home(home: &Path) -> Self {
        Self::new(home.join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the session, or an empty one if none was saved
    pub fn load(&self) -> Result<Session> {
        if !self.path.exists() {
            return Ok(Session::default());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session: {}", self.path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| SessionError::Corrupt(self.path.clone()))
    }

    /// Writes the session atomically (temp file + rename)
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, session).context("Failed to serialize session")?;
            writer.flush().context("Failed to flush session")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures;
    use tempfile::TempDir;

    fn student() -> Student {
        serde_json::from_str(r#"{"id":3,"nickname":"fast","studentName":"Kim"}"#).unwrap()
    }

    #[test]
    fn missing_file_is_empty_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::for_home(dir.path());

        let session = store.load().unwrap();
        assert_eq!(session, Session::default());
        assert!(matches!(session.require_student(), Err(SessionError::NotLoggedIn)));
    }

    #[test]
    fn save_and_load_with_dirty_draft() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::for_home(dir.path().join("nested").as_path());

        let mut session = Session {
            student: Some(student()),
            token: Some("abc".to_string()),
            ..Session::default()
        };
        session.buckets.selected = Some(fixtures::DEMO_BUCKET_ID);
        session.buckets.elements = fixtures::elements(fixtures::DEMO_BUCKET_ID);
        session.buckets.dirty = true;
        store.save(&session).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.require_student().unwrap().id, 3);
        assert!(!store.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn corrupt_file_names_path() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::for_home(dir.path());
        fs::write(store.path(), "{not json").unwrap();

        let err = store.load().unwrap_err();
        assert!(format!("{:#}", err).contains("session.json"));
    }

    #[test]
    fn logout_clears_everything() {
        let mut session = Session {
            student: Some(student()),
            token: Some("abc".to_string()),
            ..Session::default()
        };
        session.buckets.dirty = true;

        session.logout();
        assert_eq!(session, Session::default());
    }
}
