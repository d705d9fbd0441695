//! Core domain types for the guestbook.

use serde::{Deserialize, Serialize};

/// One guestbook submission.
///
/// `id` is assigned by the database and is `None` until the entry has been
/// stored. Text fields are expected to be sanitized before construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    /// Database-assigned row identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Author name.
    pub name: String,
    /// Author email.
    pub email: String,
    /// Author website, possibly empty.
    #[serde(default)]
    pub website: String,
    /// Free-form comment.
    pub comment: String,
}

impl GuestbookEntry {
    /// Build an unsaved entry.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        website: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            website: website.into(),
            comment: comment.into(),
        }
    }
}
