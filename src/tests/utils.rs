use rusqlite::Connection;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::db::connection::Database;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

/// Creates a fresh SQLite file in the temp dir with the production schema
/// plus `seed_sql`, and returns a read-only handle to it.
pub fn seeded_db(name: &str, seed_sql: &str) -> Database {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let path = std::env::temp_dir().join(format!("{name}_{nanos}.sqlite3"));

    let conn = Connection::open(&path).expect("create test db");
    conn.execute_batch(SCHEMA_SQL)
        .unwrap_or_else(|e| panic!("schema init failed: {e}"));
    conn.execute_batch(seed_sql)
        .unwrap_or_else(|e| panic!("seed failed: {e}"));
    drop(conn);

    Database::new(path)
}
