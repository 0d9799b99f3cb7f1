use anyhow::Result;
use std::path::{Path, PathBuf};

/// Base directory override taken from `POPCORN_HOME`, if set
pub fn home_override() -> Option<PathBuf> {
    std::env::var("POPCORN_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

pub struct PathManager {
    config_dir: PathBuf,
    log_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("popcorn");

        Ok(Self::from_base(base_dir))
    }

    /// Config files at the base level, logs in a subdirectory
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            log_dir: base.join("logs"),
            config_dir: base,
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.config_dir.join("credentials.toml")
    }

    pub fn default_log_file(&self) -> PathBuf {
        self.log_dir.join("popcorn.log")
    }

    /// Creates the config directory; the log directory is created by whoever writes the first log
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        if let Some(base) = home_override() {
            return Self::from_base(base);
        }

        // Platform-specific paths (e.g., ~/.config/popcorn on Linux), falling back to the working directory
        Self::new().unwrap_or_else(|_| Self::from_base(PathBuf::from(".popcorn")))
    }
}
