/// SQL schema for the terminal cache database
pub const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS cache (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT NOT NULL
);

PRAGMA user_version = 1;
"#;

/// Get current schema version from database
pub fn get_schema_version(conn: &rusqlite::Connection) -> Result<i32, rusqlite::Error> {
    conn.pragma_query_value(None, "user_version", |row| row.get(0))
}

/// Run migrations to bring database to current schema version
pub fn migrate(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    let mut version = get_schema_version(conn)?;

    // Apply migrations sequentially
    if version == 0 {
        // Fresh database - apply v1 schema
        conn.execute_batch(SCHEMA_V1)?;
        version = 1;
    }

    // Version 1 is current
    if version == 1 {
        Ok(())
    } else {
        Err(rusqlite::Error::InvalidQuery)
    }
}
