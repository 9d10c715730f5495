#![forbid(unsafe_code)]

use super::super::{AssetVersion, LogicalAsset, PointerChange, StoreError, VersionDraft};
use super::guards::is_unique_violation;
use super::rows::{asset_by_slot, current_version_id, version_by_id};
use rusqlite::{Transaction, params};
use sl_core::blob::object_key;
use sl_core::model::{AssetScope, PointerType, SlotKey};
use tracing::error;

pub(in crate::store) fn insert_asset_tx(
    tx: &Transaction<'_>,
    scope: &AssetScope,
    pointer_type: PointerType,
    now_ms: i64,
) -> Result<LogicalAsset, StoreError> {
    let inserted = tx.execute(
        r#"
        INSERT INTO asset(collection_id, owner_kind, owner_id, content_kind, pointer_type, created_at_ms)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
        params![
            scope.collection_id.as_str(),
            scope.owner_kind.as_str(),
            scope.owner_id,
            scope.content_kind.as_str(),
            pointer_type.as_str(),
            now_ms
        ],
    );
    match inserted {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err) => {
            let key = SlotKey::new(scope.collection_id.clone(), pointer_type, scope.owner_id);
            return match asset_by_slot(tx, &key)? {
                Some(existing) => Err(StoreError::AssetAlreadyExists {
                    asset_id: existing.id,
                }),
                None => Err(StoreError::Sql(err)),
            };
        }
        Err(err) => return Err(StoreError::Sql(err)),
    }

    Ok(LogicalAsset {
        id: tx.last_insert_rowid(),
        collection_id: scope.collection_id.clone(),
        owner_kind: scope.owner_kind,
        owner_id: scope.owner_id,
        content_kind: scope.content_kind,
        pointer_type,
        created_at_ms: now_ms,
    })
}

/// Appends the next version of an asset. The caller's write transaction holds
/// the database lock, so the `MAX(version_no)` read and the insert cannot
/// interleave with another writer.
pub(in crate::store) fn insert_version_tx(
    tx: &Transaction<'_>,
    asset_id: i64,
    draft: &VersionDraft,
    now_ms: i64,
) -> Result<AssetVersion, StoreError> {
    let version_no = tx.query_row(
        "SELECT COALESCE(MAX(version_no), 0) + 1 FROM asset_version WHERE asset_id=?1",
        params![asset_id],
        |row| row.get::<_, i64>(0),
    )?;
    let key = draft.location.as_deref().and_then(object_key);

    let inserted = tx.execute(
        r#"
        INSERT INTO asset_version(
          asset_id, version_no, source, status, location, object_key,
          provider, prompt, params_json, created_by, created_at_ms
        )
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            asset_id,
            version_no,
            draft.source.as_str(),
            draft.status.as_str(),
            draft.location.as_deref(),
            key.as_deref(),
            draft.provider.as_deref(),
            draft.prompt.as_deref(),
            draft.params_json.as_deref(),
            draft.created_by,
            now_ms
        ],
    );
    match inserted {
        Ok(_) => {}
        Err(err) if is_unique_violation(&err) => {
            error!(asset_id, version_no, "version number already taken");
            return Err(StoreError::VersionNumberConflict {
                asset_id,
                version_no,
            });
        }
        Err(err) => return Err(StoreError::Sql(err)),
    }

    Ok(AssetVersion {
        id: tx.last_insert_rowid(),
        asset_id,
        version_no,
        source: draft.source,
        status: draft.status,
        location: draft.location.clone(),
        object_key: key,
        provider: draft.provider.clone(),
        prompt: draft.prompt.clone(),
        params_json: draft.params_json.clone(),
        created_by: draft.created_by,
        created_at_ms: now_ms,
    })
}

/// Moves a slot's pointer after checking the version is an adoptable member of
/// the slot's asset. Writes nothing when the pointer already targets it.
pub(in crate::store) fn set_current_tx(
    tx: &Transaction<'_>,
    key: &SlotKey,
    version_id: i64,
    now_ms: i64,
) -> Result<PointerChange, StoreError> {
    let asset = asset_by_slot(tx, key)?.ok_or(StoreError::UnknownAsset)?;
    let version = version_by_id(tx, version_id)?.ok_or(StoreError::UnknownVersion)?;
    if version.asset_id != asset.id {
        return Err(StoreError::VersionOutsideAsset {
            version_id,
            asset_id: asset.id,
        });
    }
    if !version.status.is_adoptable() {
        return Err(StoreError::VersionNotAdoptable {
            version_id,
            status: version.status.as_str(),
        });
    }

    let previous_version_id = current_version_id(tx, key)?;
    if previous_version_id != Some(version_id) {
        upsert_pointer_tx(tx, key, version_id, now_ms)?;
    }
    Ok(PointerChange {
        previous_version_id,
        version_id,
    })
}

pub(in crate::store) fn upsert_pointer_tx(
    tx: &Transaction<'_>,
    key: &SlotKey,
    version_id: i64,
    now_ms: i64,
) -> Result<(), StoreError> {
    tx.execute(
        r#"
        INSERT INTO current_pointer(collection_id, pointer_type, owner_id, version_id, updated_at_ms)
        VALUES (?1, ?2, ?3, ?4, ?5)
        ON CONFLICT(collection_id, pointer_type, owner_id)
        DO UPDATE SET version_id=excluded.version_id, updated_at_ms=excluded.updated_at_ms
        "#,
        params![
            key.collection_id.as_str(),
            key.pointer_type.as_str(),
            key.owner_id,
            version_id,
            now_ms
        ],
    )?;
    Ok(())
}

pub(in crate::store) fn delete_pointer_tx(
    tx: &Transaction<'_>,
    key: &SlotKey,
) -> Result<usize, StoreError> {
    Ok(tx.execute(
        "DELETE FROM current_pointer WHERE collection_id=?1 AND pointer_type=?2 AND owner_id=?3",
        params![
            key.collection_id.as_str(),
            key.pointer_type.as_str(),
            key.owner_id
        ],
    )?)
}
