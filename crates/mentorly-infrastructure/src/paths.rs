//! Path management for mentorly configuration files.
//!
//! ```text
//! ~/.config/mentorly/          # Config directory
//! ├── config.toml              # Client configuration
//! └── logs/                    # CLI logs
//!     └── mentorly.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves where mentorly keeps its files.
///
/// `MentorlyPaths::new(None)` uses the platform config directory; passing a
/// base directory roots everything there instead (used by tests and by
/// `--config-dir`).
#[derive(Debug, Clone)]
pub struct MentorlyPaths {
    base: Option<PathBuf>,
}

impl MentorlyPaths {
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the mentorly configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join("mentorly"))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to the client configuration file.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("config.toml"))
    }

    /// Returns the log directory.
    pub fn logs_dir(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join("logs"))
    }

    /// Creates `dir` if it does not exist yet.
    pub fn ensure_dir(dir: &Path) -> std::io::Result<()> {
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

impl Default for MentorlyPaths {
    fn default() -> Self {
        Self::new(None)
    }
}
