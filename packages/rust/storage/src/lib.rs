//! libSQL storage layer for guestbook entries.
//!
//! The [`EntryStore`] holds only the resolved [`DbTarget`]. Every operation
//! opens its own database handle and connection, runs exactly one statement,
//! and drops both before returning, whether the statement succeeded or not.
//!
//! Row order for [`EntryStore::list_entries`] is whatever the engine's table
//! scan yields. For libSQL that is ascending `id`, but no `ORDER BY` is issued.

mod target;

pub use target::DbTarget;

use guestbook_shared::{DbConfig, GuestbookEntry, GuestbookError, Result};
use libsql::{Connection, Database, params};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS guestbook (
    id      INTEGER PRIMARY KEY AUTOINCREMENT,
    name    TEXT NOT NULL,
    email   TEXT NOT NULL,
    website TEXT,
    comment TEXT NOT NULL
)";

const INSERT_ENTRY_SQL: &str =
    "INSERT INTO guestbook (name, email, website, comment) VALUES (?1, ?2, ?3, ?4)";

const SELECT_ENTRIES_SQL: &str = "SELECT id, name, email, website, comment FROM guestbook";

/// Data-access object for the `guestbook` table.
#[derive(Debug, Clone)]
pub struct EntryStore {
    target: DbTarget,
    username: String,
}

impl EntryStore {
    /// Build a store from resolved configuration. Fails only if `DB_URL`
    /// cannot be mapped to a backend; no connection is attempted here.
    pub fn new(config: DbConfig) -> Result<Self> {
        let target = DbTarget::from_config(&config)?;
        tracing::debug!(db = ?target, username = %config.username, "entry store configured");
        Ok(Self {
            target,
            username: config.username,
        })
    }

    /// The backend this store talks to.
    pub fn target(&self) -> &DbTarget {
        &self.target
    }

    /// Open a fresh database handle and connection.
    ///
    /// The caller keeps both alive for the duration of one statement.
    async fn connect(&self) -> Result<(Database, Connection)> {
        let db = match &self.target {
            DbTarget::Local(path) => libsql::Builder::new_local(path).build().await,
            DbTarget::Remote { url, auth_token } => {
                libsql::Builder::new_remote(url.clone(), auth_token.clone())
                    .build()
                    .await
            }
        }
        .map_err(|e| {
            GuestbookError::persistence(format!("unable to open database: {e}"))
        })?;

        let conn = db.connect().map_err(|e| {
            GuestbookError::persistence(format!(
                "unable to connect as '{}': {e}",
                self.username
            ))
        })?;

        tracing::trace!(db = ?self.target, "connection opened");
        Ok((db, conn))
    }

    /// Create the `guestbook` table if it does not exist yet.
    ///
    /// For embedded files the parent directory is created as well.
    pub async fn ensure_schema(&self) -> Result<()> {
        if let DbTarget::Local(path) = &self.target {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|e| GuestbookError::io(parent, e))?;
            }
        }

        let (_db, conn) = self.connect().await?;
        conn.execute(CREATE_TABLE_SQL, ())
            .await
            .map_err(GuestbookError::persistence)?;
        tracing::debug!("guestbook table ready");
        Ok(())
    }

    /// Insert `entry` and return the identifier the database assigned.
    ///
    /// Any `id` already set on `entry` is ignored.
    pub async fn add_entry(&self, entry: &GuestbookEntry) -> Result<i64> {
        let (_db, conn) = self.connect().await?;
        conn.execute(
            INSERT_ENTRY_SQL,
            params![
                entry.name.as_str(),
                entry.email.as_str(),
                entry.website.as_str(),
                entry.comment.as_str(),
            ],
        )
        .await
        .map_err(GuestbookError::persistence)?;

        let id = conn.last_insert_rowid();
        tracing::info!(id, "guestbook entry added");
        Ok(id)
    }

    /// Read every row of the table.
    pub async fn list_entries(&self) -> Result<Vec<GuestbookEntry>> {
        let (_db, conn) = self.connect().await?;
        let mut rows = conn
            .query(SELECT_ENTRIES_SQL, ())
            .await
            .map_err(GuestbookError::persistence)?;

        let mut entries = Vec::new();
        while let Some(row) = rows.next().await.map_err(GuestbookError::persistence)? {
            entries.push(row_to_entry(&row)?);
        }
        tracing::debug!(count = entries.len(), "guestbook entries loaded");
        Ok(entries)
    }
}

/// Convert a database row to a [`GuestbookEntry`].
fn row_to_entry(row: &libsql::Row) -> Result<GuestbookEntry> {
    Ok(GuestbookEntry {
        id: Some(row.get::<i64>(0).map_err(GuestbookError::persistence)?),
        name: row.get::<String>(1).map_err(GuestbookError::persistence)?,
        email: row.get::<String>(2).map_err(GuestbookError::persistence)?,
        website: row
            .get::<Option<String>>(3)
            .map_err(GuestbookError::persistence)?
            .unwrap_or_default(),
        comment: row.get::<String>(4).map_err(GuestbookError::persistence)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn temp_db_path() -> PathBuf {
        std::env::temp_dir().join(format!("gb_test_{}.db", Uuid::now_v7()))
    }

    fn store_at(path: &std::path::Path) -> EntryStore {
        EntryStore::new(DbConfig {
            url: format!("file://{}", path.display()),
            username: "guest".into(),
            password: String::new(),
        })
        .expect("configure store")
    }

    /// Create a temp file store with the table in place.
    async fn test_store() -> EntryStore {
        let store = store_at(&temp_db_path());
        store.ensure_schema().await.expect("create table");
        store
    }

    #[tokio::test]
    async fn empty_table_lists_nothing() {
        let store = test_store().await;
        let entries = store.list_entries().await.expect("list");
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn add_then_list_round_trip() {
        let store = test_store().await;
        let entry = GuestbookEntry::new("Ada", "ada@example.com", "https://ada.dev", "censurhellocensur");

        let id = store.add_entry(&entry).await.expect("add");
        assert!(id > 0);

        let entries = store.list_entries().await.expect("list");
        assert_eq!(entries.len(), 1);
        let stored = &entries[0];
        assert_eq!(stored.id, Some(id));
        assert_eq!(stored.name, "Ada");
        assert_eq!(stored.email, "ada@example.com");
        assert_eq!(stored.website, "https://ada.dev");
        assert_eq!(stored.comment, "censurhellocensur");
    }

    #[tokio::test]
    async fn ids_are_unique_and_increasing() {
        let store = test_store().await;
        let first = store
            .add_entry(&GuestbookEntry::new("a", "a@x", "", "one"))
            .await
            .unwrap();
        let second = store
            .add_entry(&GuestbookEntry::new("b", "b@x", "", "two"))
            .await
            .unwrap();
        assert_ne!(first, second);
        assert!(second > first);

        let ids: Vec<_> = store
            .list_entries()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![Some(first), Some(second)]);
    }

    #[tokio::test]
    async fn preset_id_is_ignored() {
        let store = test_store().await;
        let mut entry = GuestbookEntry::new("a", "a@x", "", "one");
        entry.id = Some(999);
        let id = store.add_entry(&entry).await.unwrap();
        assert_eq!(id, 1);
    }

    #[tokio::test]
    async fn values_are_bound_not_interpolated() {
        let store = test_store().await;
        let hostile = "'); DROP TABLE guestbook; --";
        store
            .add_entry(&GuestbookEntry::new(hostile, "x@y", "", hostile))
            .await
            .expect("add");

        let entries = store.list_entries().await.expect("table still exists");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, hostile);
    }

    #[tokio::test]
    async fn null_website_reads_as_empty() {
        let path = temp_db_path();
        let store = store_at(&path);
        store.ensure_schema().await.unwrap();

        let db = libsql::Builder::new_local(&path).build().await.unwrap();
        let conn = db.connect().unwrap();
        conn.execute(
            "INSERT INTO guestbook (name, email, website, comment) VALUES ('n', 'e', NULL, 'c')",
            (),
        )
        .await
        .unwrap();
        drop(conn);
        drop(db);

        let entries = store.list_entries().await.unwrap();
        assert_eq!(entries[0].website, "");
    }

    #[tokio::test]
    async fn undecodable_website_is_persistence_error() {
        let path = temp_db_path();
        let store = store_at(&path);
        store.ensure_schema().await.unwrap();

        let db = libsql::Builder::new_local(&path).build().await.unwrap();
        let conn = db.connect().unwrap();
        conn.execute(
            "INSERT INTO guestbook (name, email, website, comment) VALUES ('n', 'e', X'00FF', 'c')",
            (),
        )
        .await
        .unwrap();
        drop(conn);
        drop(db);

        let err = store.list_entries().await.unwrap_err();
        assert!(matches!(err, GuestbookError::Persistence(_)));
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = test_store().await;
        store.add_entry(&GuestbookEntry::new("a", "a@x", "", "c")).await.unwrap();
        store.ensure_schema().await.expect("second run");
        assert_eq!(store.list_entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_table_is_persistence_error() {
        let store = store_at(&temp_db_path());
        let err = store.list_entries().await.unwrap_err();
        assert!(matches!(err, GuestbookError::Persistence(_)));
    }

    #[tokio::test]
    async fn unreachable_database_is_persistence_error() {
        let path = std::env::temp_dir()
            .join(format!("gb_missing_dir_{}", Uuid::now_v7()))
            .join("guestbook.db");
        let store = store_at(&path);

        let err = store
            .add_entry(&GuestbookEntry::new("a", "a@x", "", "c"))
            .await
            .unwrap_err();
        assert!(matches!(err, GuestbookError::Persistence(_)));
        assert!(!path.exists());
    }

    #[test]
    fn unsupported_scheme_fails_at_construction() {
        let err = EntryStore::new(DbConfig {
            url: "mysql://localhost:3306/guestbook".into(),
            username: "guest".into(),
            password: "pw".into(),
        })
        .unwrap_err();
        assert!(matches!(err, GuestbookError::Config { .. }));
    }
}
