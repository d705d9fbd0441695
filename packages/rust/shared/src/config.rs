//! Database configuration for the guestbook.
//!
//! User config lives at `~/.guestbook/guestbook.toml` and carries the
//! `DB_URL`, `DB_USERNAME` and `DB_PASSWORD` keys. Environment variables of
//! the same names override file values key by key.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GuestbookError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "guestbook.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".guestbook";

/// Key holding the database URL (`scheme://host:port/database`).
pub const DB_URL_KEY: &str = "DB_URL";
/// Key holding the database user name.
pub const DB_USERNAME_KEY: &str = "DB_USERNAME";
/// Key holding the database password or auth token.
pub const DB_PASSWORD_KEY: &str = "DB_PASSWORD";

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Raw contents of `guestbook.toml`. Every key is optional here; presence is
/// checked by [`DbConfig::resolve`] once environment overrides are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(rename = "DB_URL", default)]
    pub db_url: Option<String>,

    #[serde(rename = "DB_USERNAME", default)]
    pub db_username: Option<String>,

    #[serde(rename = "DB_PASSWORD", default)]
    pub db_password: Option<String>,
}

/// Resolved connection settings, built once at startup and handed to the store.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    /// Database URL, e.g. `file:///var/lib/guestbook.db` or `libsql://host:8080/db`.
    pub url: String,
    /// User name. Recorded for diagnostics; libSQL authenticates by token.
    pub username: String,
    /// Password, used as the auth token for remote databases. May be empty.
    pub password: String,
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl DbConfig {
    /// Merge file values with overrides from `env`, then check that every
    /// required key is present.
    ///
    /// `env` is a lookup function so callers can pass `std::env::var` or a
    /// fixed map in tests.
    pub fn resolve(file: ConfigFile, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let url = env(DB_URL_KEY).or(file.db_url);
        let username = env(DB_USERNAME_KEY).or(file.db_username);
        let password = env(DB_PASSWORD_KEY).or(file.db_password);

        let url = require(url, DB_URL_KEY)?;
        let username = require(username, DB_USERNAME_KEY)?;
        let password = password.ok_or_else(|| missing(DB_PASSWORD_KEY))?;

        Ok(Self {
            url,
            username,
            password,
        })
    }
}

fn require(value: Option<String>, key: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        Some(_) => Err(GuestbookError::config(format!("{key} is empty"))),
        None => Err(missing(key)),
    }
}

fn missing(key: &str) -> GuestbookError {
    GuestbookError::config(format!(
        "{key} is not set. Add it to {CONFIG_FILE_NAME} or export the {key} environment variable."
    ))
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.guestbook/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| GuestbookError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.guestbook/guestbook.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the database configuration.
///
/// An explicit `path` must exist and parse. Without one, the default file is
/// read if present; otherwise every key has to come from the environment.
pub fn load_config(path: Option<&Path>) -> Result<DbConfig> {
    let file = match path {
        Some(p) => load_config_from(p)?,
        None => {
            let default_path = config_file_path()?;
            if default_path.exists() {
                load_config_from(&default_path)?
            } else {
                tracing::debug!(path = ?default_path, "config file not found, using environment only");
                ConfigFile::default()
            }
        }
    };

    let config = DbConfig::resolve(file, |key| std::env::var(key).ok())?;
    tracing::debug!(?config, "resolved database config");
    Ok(config)
}

/// Load the raw config file from a specific path.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        GuestbookError::config(format!("unable to load {}: {e}", path.display()))
    })?;

    toml::from_str(&content).map_err(|e| {
        GuestbookError::config(format!("failed to parse {}: {e}", path.display()))
    })
}
