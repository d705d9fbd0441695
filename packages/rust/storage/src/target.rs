//! Resolution of `DB_URL` into a concrete libSQL backend.

use std::fmt;
use std::path::PathBuf;

use guestbook_shared::{DbConfig, GuestbookError, Result};
use url::Url;

/// Where the guestbook table lives.
#[derive(Clone, PartialEq, Eq)]
pub enum DbTarget {
    /// Embedded database file.
    Local(PathBuf),
    /// Remote libSQL / sqld server.
    Remote { url: String, auth_token: String },
}

impl fmt::Debug for DbTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local(path) => f.debug_tuple("Local").field(path).finish(),
            Self::Remote { url, .. } => f
                .debug_struct("Remote")
                .field("url", url)
                .field("auth_token", &"<redacted>")
                .finish(),
        }
    }
}

impl DbTarget {
    /// Parse the configured URL.
    ///
    /// Accepted forms: `file://<path>`, `file:<path>`, `sqlite://<path>` for an
    /// embedded file (`file:///` URLs are percent-decoded, the others are taken
    /// as written); `libsql://`, `http(s)://`, `ws(s)://` for a server. A
    /// leading `jdbc:` is ignored. Anything else is a config error.
    pub fn from_config(config: &DbConfig) -> Result<Self> {
        let raw = config.url.trim();
        let raw = raw.strip_prefix("jdbc:").unwrap_or(raw);

        let (scheme, rest) = raw.split_once(':').ok_or_else(|| {
            GuestbookError::config(format!("DB_URL '{raw}' has no scheme"))
        })?;

        match scheme.to_ascii_lowercase().as_str() {
            "file" if rest.starts_with("///") => {
                let path = Url::parse(raw)
                    .ok()
                    .and_then(|url| url.to_file_path().ok())
                    .ok_or_else(|| {
                        GuestbookError::config(format!("DB_URL '{raw}' is not a valid file URL"))
                    })?;
                Ok(Self::Local(path))
            }
            "file" | "sqlite" => {
                let path = rest.strip_prefix("//").unwrap_or(rest);
                if path.is_empty() {
                    return Err(GuestbookError::config(format!(
                        "DB_URL '{raw}' does not name a database file"
                    )));
                }
                Ok(Self::Local(PathBuf::from(path)))
            }
            "libsql" | "http" | "https" | "ws" | "wss" => {
                let url = Url::parse(raw)
                    .map_err(|e| GuestbookError::config(format!("invalid DB_URL '{raw}': {e}")))?;
                if url.host_str().is_none() {
                    return Err(GuestbookError::config(format!(
                        "DB_URL '{raw}' is missing a host"
                    )));
                }
                Ok(Self::Remote {
                    url: url.to_string(),
                    auth_token: config.password.clone(),
                })
            }
            other => Err(GuestbookError::config(format!(
                "unsupported DB_URL scheme '{other}': expected file, sqlite, libsql, http(s) or ws(s)"
            ))),
        }
    }
}
