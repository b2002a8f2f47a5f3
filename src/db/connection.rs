use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;

use crate::errors::AuditError;

/// Handle to the read model. Holds only the locator; every call to
/// [`Database::with_conn`] opens its own read-only connection and drops it
/// before returning.
#[derive(Debug, Clone)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Opens a read-only connection and hands it to the closure.
    /// A missing or unreadable database is an error here, never a new empty file.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, AuditError>
    where
        F: FnOnce(&Connection) -> Result<T, AuditError>,
    {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| {
            AuditError::DbError(format!("Open DB {} failed: {e}", self.path.display()))
        })?;

        f(&conn)
    }
}

/// Runs a trivial query; returns the SQLite library version on success.
pub fn check_connection(db: &Database) -> Result<String, AuditError> {
    db.with_conn(|conn| {
        conn.query_row("SELECT sqlite_version()", [], |row| row.get::<_, String>(0))
            .map_err(|e| AuditError::DbError(format!("Connection check failed: {e}")))
    })
}
