//! Settings schema, versioned through SQLite's `user_version` pragma

use rusqlite::Connection;

use crate::Result;

pub(crate) const SCHEMA_VERSION: i32 = 1;

/// Bring a freshly opened connection up to the current schema.
pub(crate) fn ensure_schema(conn: &Connection) -> Result<()> {
    let version: i32 = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    if version >= SCHEMA_VERSION {
        return Ok(());
    }

    tracing::info!(from = version, to = SCHEMA_VERSION, "Creating settings schema");

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );
    "#,
    )?;
    conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;

    Ok(())
}
