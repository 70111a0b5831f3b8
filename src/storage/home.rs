//! Home directory management
//!
//! Resolves the regsim home directory and provides access to its files.

use std::path::{Path, PathBuf};

use anyhow::Result;
use thiserror::Error;

use super::{Config, SessionStore};

#[derive(Debug, Error)]
pub enum HomeError {
    #[error("Cannot determine a home directory. Set REGSIM_HOME.")]
    Unresolved,
}

/// The regsim home directory with its loaded configuration
pub struct Home {
    dir: PathBuf,
    config: Config,
}

impl Home {
    /// Opens a home directory. It does not need to exist yet.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let config = Config::load_from(&dir)?;
        Ok(Self { dir, config })
    }

    /// Opens `$REGSIM_HOME` or the platform config directory
    pub fn open_default() -> Result<Self> {
        let dir = Config::home_dir().ok_or(HomeError::Unresolved)?;
        Self::open(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn config_path(&self) -> PathBuf {
        Config::path_in(&self.dir)
    }

    /// Writes the current configuration back to disk
    pub fn save_config(&self) -> Result<()> {
        self.config.save_to(&self.dir)
    }

    pub fn session_store(&self) -> SessionStore {
        SessionStore::for_home(&self.dir)
    }
}
