//! Shared types, error model, and configuration for the guestbook.
//!
//! This crate is the foundation depended on by all other guestbook crates.
//! It provides:
//! - [`GuestbookError`] — the unified error type
//! - Domain types ([`GuestbookEntry`])
//! - Configuration ([`DbConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    ConfigFile, DB_PASSWORD_KEY, DB_URL_KEY, DB_USERNAME_KEY, DbConfig, config_dir,
    config_file_path, load_config, load_config_from,
};
pub use error::{GuestbookError, Result};
pub use types::GuestbookEntry;
