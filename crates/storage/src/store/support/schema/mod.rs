#![forbid(unsafe_code)]

mod sql;

use super::super::StoreError;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;

pub(in crate::store) const SCHEMA_VERSION: i64 = 1;

const REQUIRED_TABLES: [&str; 6] = [
    "store_state",
    "asset",
    "asset_version",
    "current_pointer",
    "ordered_parent",
    "ordered_item",
];

/// An empty file is accepted for install. Anything else must carry exactly our
/// tables and our schema version, or the caller has to reset it.
pub(in crate::store) fn preflight_gate(conn: &Connection) -> Result<(), StoreError> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
    )?;
    let present = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<BTreeSet<String>, _>>()?;
    if present.is_empty() {
        return Ok(());
    }

    let expected: BTreeSet<String> = REQUIRED_TABLES.iter().map(|t| t.to_string()).collect();
    if present != expected {
        return Err(StoreError::InvalidInput(
            "RESET_REQUIRED: table set does not match this schema",
        ));
    }

    let stored = conn
        .query_row(
            "SELECT schema_version FROM store_state WHERE singleton=1",
            [],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    if stored != Some(SCHEMA_VERSION) {
        return Err(StoreError::InvalidInput(
            "RESET_REQUIRED: stored schema version is absent or different",
        ));
    }
    Ok(())
}

pub(in crate::store) fn install_schema(conn: &Connection, now_ms: i64) -> Result<(), StoreError> {
    conn.execute_batch(&sql::full_schema_sql())?;

    conn.execute(
        "INSERT INTO store_state(singleton, schema_version, created_at_ms, updated_at_ms) \
         VALUES (1, ?1, ?2, ?2) \
         ON CONFLICT(singleton) DO UPDATE SET schema_version=excluded.schema_version, updated_at_ms=excluded.updated_at_ms",
        params![SCHEMA_VERSION, now_ms],
    )?;

    Ok(())
}
