//! Configuration and token persistence.
//!
//! Encore keeps a single JSON config file in the platform-standard config
//! directory:
//!
//! - Linux: `~/.config/encore/config.json`
//! - macOS: `~/Library/Application Support/encore/config.json`
//! - Windows: `%APPDATA%\encore\config.json`
//!
//! The only setting today is the Deezer access token saved by
//! `encore auth`. Token resolution order for a command is: `--token`
//! flag, `DEEZER_ACCESS_TOKEN` environment variable (both handled by
//! clap), then this file.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Deezer access token obtained out of band.
    pub token: Option<String>,
}

impl Config {
    /// Load the config from `path`. A missing file yields the default
    /// config; a malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_json::from_str(&raw)
            .map_err(|e| Error::Config(format!("cannot parse {}: {e}", path.display())))
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("cannot create {}: {e}", parent.display())))?;
        }
        let raw = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("cannot serialize config: {e}")))?;
        fs::write(path, raw)
            .map_err(|e| Error::Config(format!("cannot write {}: {e}", path.display())))
    }
}

/// Path to the config file in the platform config directory.
///
/// # Errors
///
/// Fails when the platform config directory cannot be determined.
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .ok_or_else(|| Error::Config("could not determine the config directory".to_string()))?;
    Ok(dir.join("encore").join("config.json"))
}

/// The token saved by `encore auth`, if any. Read errors are treated as
/// no saved token so a corrupt config never blocks read-only commands.
#[must_use]
pub fn saved_token() -> Option<String> {
    let path = config_path().ok()?;
    Config::load_from(&path).ok()?.token
}

/// Persist `token` for later runs.
pub fn save_token(token: &str) -> Result<()> {
    let path = config_path()?;
    let mut config = Config::load_from(&path).unwrap_or_default();
    config.token = Some(token.to_string());
    config.save_to(&path)
}
