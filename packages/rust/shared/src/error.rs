//! Error types for the guestbook.
//!
//! Library crates use [`GuestbookError`] via `thiserror`.
//! The CLI wraps startup failures with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all guestbook operations.
#[derive(Debug, thiserror::Error)]
pub enum GuestbookError {
    /// Missing or unreadable configuration. Fatal at startup.
    #[error("config error: {message}")]
    Config { message: String },

    /// Connection or statement failure against the entries table.
    #[error("storage error: {0}")]
    Persistence(String),

    /// Malformed menu selection.
    #[error("{message}")]
    Input { message: String },

    /// Filesystem I/O error (config file reads, database directory creation).
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GuestbookError>;

impl GuestbookError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a persistence error from any displayable message.
    pub fn persistence(msg: impl ToString) -> Self {
        Self::Persistence(msg.to_string())
    }

    /// Create an input error from any displayable message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = GuestbookError::config("DB_URL is not set");
        assert_eq!(err.to_string(), "config error: DB_URL is not set");

        let err = GuestbookError::persistence("unable to open database file");
        assert_eq!(err.to_string(), "storage error: unable to open database file");

        let err = GuestbookError::input("Invalid option, please try again.");
        assert_eq!(err.to_string(), "Invalid option, please try again.");
    }
}
