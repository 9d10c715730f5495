#![forbid(unsafe_code)]

use super::super::{AssetVersion, LogicalAsset, OrderedItem, StoreError, VersionDraft};
use super::rows::{ITEM_COLUMNS, RawItem, asset_by_id, version_by_id};
use rusqlite::{Connection, ErrorCode, OptionalExtension, ffi, params};
use sl_core::ids::CollectionId;
use sl_core::model::{AssetScope, PointerType, VersionStatus};

const MAX_LOCATION_LEN: usize = 2048;
const MAX_PAYLOAD_LEN: usize = 64 * 1024;

/// Loads an asset and checks it lives under the caller's collection.
pub(in crate::store) fn owned_asset(
    conn: &Connection,
    collection_id: &CollectionId,
    asset_id: i64,
) -> Result<LogicalAsset, StoreError> {
    let asset = asset_by_id(conn, asset_id)?.ok_or(StoreError::UnknownAsset)?;
    if &asset.collection_id != collection_id {
        return Err(StoreError::ScopeMismatch(
            "asset does not belong to the collection",
        ));
    }
    Ok(asset)
}

/// Loads a version together with its asset, scoped to the caller's collection.
pub(in crate::store) fn owned_version(
    conn: &Connection,
    collection_id: &CollectionId,
    version_id: i64,
) -> Result<(LogicalAsset, AssetVersion), StoreError> {
    let version = version_by_id(conn, version_id)?.ok_or(StoreError::UnknownVersion)?;
    let asset = owned_asset(conn, collection_id, version.asset_id)?;
    Ok((asset, version))
}

/// Loads an active item and checks it belongs to the named parent.
pub(in crate::store) fn owned_item(
    conn: &Connection,
    parent_id: &CollectionId,
    item_id: i64,
) -> Result<OrderedItem, StoreError> {
    let row = conn
        .query_row(
            &format!("SELECT {ITEM_COLUMNS}, deleted_at_ms FROM ordered_item WHERE id=?1"),
            params![item_id],
            |row| Ok((RawItem::read(row)?, row.get::<_, Option<i64>>(6)?)),
        )
        .optional()?;
    let Some((raw, deleted_at_ms)) = row else {
        return Err(StoreError::UnknownItem);
    };
    let item = raw.parse()?;
    if &item.parent_id != parent_id {
        return Err(StoreError::ScopeMismatch(
            "item does not belong to the parent",
        ));
    }
    if deleted_at_ms.is_some() {
        return Err(StoreError::UnknownItem);
    }
    Ok(item)
}

pub(in crate::store) fn scope_pointer_type(scope: &AssetScope) -> Result<PointerType, StoreError> {
    scope
        .pointer_type()
        .map_err(|err| StoreError::InvalidInput(err.message()))
}

pub(in crate::store) fn validate_owner_id(owner_id: i64) -> Result<(), StoreError> {
    if owner_id <= 0 {
        return Err(StoreError::InvalidInput("owner_id must be positive"));
    }
    Ok(())
}

/// Normalizes a draft in place: trims optional text, drops blanks, checks params.
pub(in crate::store) fn normalize_draft(mut draft: VersionDraft) -> Result<VersionDraft, StoreError> {
    draft.location = normalize_location(draft.location)?;
    draft.provider = non_blank(draft.provider);
    draft.prompt = non_blank(draft.prompt);
    draft.params_json = non_blank(draft.params_json);

    if draft.status == VersionStatus::Ready && draft.location.is_none() {
        return Err(StoreError::InvalidInput("ready version requires a location"));
    }
    if let Some(params_json) = draft.params_json.as_deref() {
        validate_params_json(params_json)?;
    }
    Ok(draft)
}

pub(in crate::store) fn normalize_location(
    location: Option<String>,
) -> Result<Option<String>, StoreError> {
    let Some(location) = non_blank(location) else {
        return Ok(None);
    };
    if location.len() > MAX_LOCATION_LEN {
        return Err(StoreError::InvalidInput("location is too long"));
    }
    if location.chars().any(|c| c.is_control()) {
        return Err(StoreError::InvalidInput("location contains control characters"));
    }
    Ok(Some(location))
}

pub(in crate::store) fn validate_payload(payload: &str) -> Result<(), StoreError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(StoreError::InvalidInput("payload is too large"));
    }
    Ok(())
}

fn validate_params_json(raw: &str) -> Result<(), StoreError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|_| StoreError::InvalidInput("params_json must be valid json"))?;
    if !value.is_object() {
        return Err(StoreError::InvalidInput("params_json must be a json object"));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// True only for UNIQUE and PRIMARY KEY failures. CHECK, foreign-key and
/// trigger aborts share the constraint result code but are not collisions.
pub(in crate::store) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(code, _) => {
            code.code == ErrorCode::ConstraintViolation
                && matches!(
                    code.extended_code,
                    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                )
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_unique_violation;
    use rusqlite::Connection;

    fn failing(conn: &Connection, sql: &str) -> rusqlite::Error {
        conn.execute(sql, []).expect_err("statement must fail")
    }

    #[test]
    fn only_unique_and_primary_key_failures_count_as_collisions() {
        let conn = Connection::open_in_memory().expect("in-memory db");
        conn.execute_batch(
            r#"
            CREATE TABLE slots (id INTEGER PRIMARY KEY, name TEXT UNIQUE, n INTEGER CHECK(n >= 1));
            INSERT INTO slots(id, name, n) VALUES (1, 'a', 1);
            CREATE TABLE frozen (id INTEGER PRIMARY KEY);
            CREATE TRIGGER frozen_guard BEFORE INSERT ON frozen
              BEGIN SELECT RAISE(ABORT, 'frozen'); END;
            "#,
        )
        .expect("schema");

        assert!(is_unique_violation(&failing(
            &conn,
            "INSERT INTO slots(id, name, n) VALUES (2, 'a', 1)"
        )));
        assert!(is_unique_violation(&failing(
            &conn,
            "INSERT INTO slots(id, name, n) VALUES (1, 'b', 1)"
        )));
        assert!(!is_unique_violation(&failing(
            &conn,
            "INSERT INTO slots(id, name, n) VALUES (3, 'c', 0)"
        )));
        assert!(!is_unique_violation(&failing(
            &conn,
            "INSERT INTO frozen(id) VALUES (1)"
        )));
    }
}
