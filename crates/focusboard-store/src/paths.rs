//! Path resolution for focusboard files

use std::path::{Path, PathBuf};

/// Resolves standard paths under the focusboard home directory
#[derive(Debug, Clone)]
pub struct Paths {
    pub home: PathBuf,
}

impl Paths {
    /// Resolve `~/.focusboard`
    pub fn new() -> std::io::Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "home directory not found")
        })?;

        Ok(Self {
            home: home.join(".focusboard"),
        })
    }

    /// Use an explicit root instead of the home directory
    pub fn with_root(root: &Path) -> Self {
        Self {
            home: root.to_path_buf(),
        }
    }

    /// Get config.json path
    pub fn config_file(&self) -> PathBuf {
        self.home.join("config.json")
    }

    /// Default location of the persisted session file
    pub fn data_file(&self) -> PathBuf {
        self.home.join("sessions.csv")
    }

    /// Directory exports are written to when no output path is given
    pub fn exports_dir(&self) -> PathBuf {
        self.home.join("exports")
    }
}
