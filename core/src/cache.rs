use rusqlite::{params, Connection, OptionalExtension, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Cache key holding the working set of reports.
pub const WORKING_SET_KEY: &str = "mdt_reports_temp";

/// Cache key holding the soft-deleted report ids.
pub const DELETED_IDS_KEY: &str = "mdt_reports_deleted";

/// Open or create a cache database at the specified path
pub fn open_cache(path: &Path) -> Result<Connection> {
    let conn = Connection::open(path)?;
    crate::schema::migrate(&conn)?;
    Ok(conn)
}

/// Read a JSON list value. A missing key yields the empty list; so does a
/// malformed value, after logging it, because a corrupt cache entry must never
/// take the terminal down.
pub fn get<T: DeserializeOwned>(conn: &Connection, key: &str) -> Result<Vec<T>> {
    let raw: Option<String> = conn
        .query_row("SELECT value FROM cache WHERE key = ?1", params![key], |row| row.get(0))
        .optional()?;

    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    match serde_json::from_str(&raw) {
        Ok(items) => Ok(items),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding malformed cache value");
            Ok(Vec::new())
        }
    }
}

/// Write a list value as JSON, replacing any previous value under the key.
pub fn set<T: Serialize>(conn: &Connection, key: &str, items: &[T]) -> Result<()> {
    let raw = serde_json::to_string(items)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    conn.execute(
        "INSERT OR REPLACE INTO cache (key, value) VALUES (?1, ?2)",
        params![key, raw],
    )?;
    Ok(())
}
