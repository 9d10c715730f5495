#![forbid(unsafe_code)]

use super::super::{AssetVersion, LogicalAsset, OrderedItem, StoreError};
use rusqlite::{Connection, OptionalExtension, Row, params};
use sl_core::ids::CollectionId;
use sl_core::model::{ContentKind, OwnerKind, PointerType, SlotKey, VersionSource, VersionStatus};

pub(in crate::store) const ASSET_COLUMNS: &str =
    "id, collection_id, owner_kind, owner_id, content_kind, pointer_type, created_at_ms";

pub(in crate::store) const VERSION_COLUMNS: &str = "id, asset_id, version_no, source, status, location, object_key, provider, prompt, params_json, created_by, created_at_ms";

pub(in crate::store) const ITEM_COLUMNS: &str =
    "id, parent_id, ordinal, payload, created_at_ms, updated_at_ms";

pub(in crate::store) struct RawAsset {
    id: i64,
    collection_id: String,
    owner_kind: String,
    owner_id: i64,
    content_kind: String,
    pointer_type: String,
    created_at_ms: i64,
}

impl RawAsset {
    pub(in crate::store) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            collection_id: row.get(1)?,
            owner_kind: row.get(2)?,
            owner_id: row.get(3)?,
            content_kind: row.get(4)?,
            pointer_type: row.get(5)?,
            created_at_ms: row.get(6)?,
        })
    }

    pub(in crate::store) fn parse(self) -> Result<LogicalAsset, StoreError> {
        let invalid = || StoreError::InvalidInput("invalid asset row");
        let pointer_type = PointerType::parse(&self.pointer_type).ok_or_else(invalid)?;
        let owner_kind = OwnerKind::parse(&self.owner_kind).ok_or_else(invalid)?;
        let content_kind = ContentKind::parse(&self.content_kind).ok_or_else(invalid)?;
        if pointer_type.owner_kind() != owner_kind || pointer_type.content_kind() != content_kind {
            return Err(invalid());
        }
        Ok(LogicalAsset {
            id: self.id,
            collection_id: CollectionId::try_new(self.collection_id).map_err(|_| invalid())?,
            owner_kind,
            owner_id: self.owner_id,
            content_kind,
            pointer_type,
            created_at_ms: self.created_at_ms,
        })
    }
}

pub(in crate::store) struct RawVersion {
    id: i64,
    asset_id: i64,
    version_no: i64,
    source: String,
    status: String,
    location: Option<String>,
    object_key: Option<String>,
    provider: Option<String>,
    prompt: Option<String>,
    params_json: Option<String>,
    created_by: Option<i64>,
    created_at_ms: i64,
}

impl RawVersion {
    pub(in crate::store) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            asset_id: row.get(1)?,
            version_no: row.get(2)?,
            source: row.get(3)?,
            status: row.get(4)?,
            location: row.get(5)?,
            object_key: row.get(6)?,
            provider: row.get(7)?,
            prompt: row.get(8)?,
            params_json: row.get(9)?,
            created_by: row.get(10)?,
            created_at_ms: row.get(11)?,
        })
    }

    pub(in crate::store) fn parse(self) -> Result<AssetVersion, StoreError> {
        let invalid = || StoreError::InvalidInput("invalid version row");
        Ok(AssetVersion {
            id: self.id,
            asset_id: self.asset_id,
            version_no: self.version_no,
            source: VersionSource::parse(&self.source).ok_or_else(invalid)?,
            status: VersionStatus::parse(&self.status).ok_or_else(invalid)?,
            location: self.location,
            object_key: self.object_key,
            provider: self.provider,
            prompt: self.prompt,
            params_json: self.params_json,
            created_by: self.created_by,
            created_at_ms: self.created_at_ms,
        })
    }
}

pub(in crate::store) struct RawItem {
    id: i64,
    parent_id: String,
    ordinal: i64,
    payload: String,
    created_at_ms: i64,
    updated_at_ms: i64,
}

impl RawItem {
    pub(in crate::store) fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            parent_id: row.get(1)?,
            ordinal: row.get(2)?,
            payload: row.get(3)?,
            created_at_ms: row.get(4)?,
            updated_at_ms: row.get(5)?,
        })
    }

    pub(in crate::store) fn parse(self) -> Result<OrderedItem, StoreError> {
        Ok(OrderedItem {
            id: self.id,
            parent_id: CollectionId::try_new(self.parent_id)
                .map_err(|_| StoreError::InvalidInput("invalid ordered item row"))?,
            ordinal: self.ordinal,
            payload: self.payload,
            created_at_ms: self.created_at_ms,
            updated_at_ms: self.updated_at_ms,
        })
    }
}

pub(in crate::store) fn asset_by_id(
    conn: &Connection,
    asset_id: i64,
) -> Result<Option<LogicalAsset>, StoreError> {
    conn.query_row(
        &format!("SELECT {ASSET_COLUMNS} FROM asset WHERE id=?1"),
        params![asset_id],
        RawAsset::read,
    )
    .optional()?
    .map(RawAsset::parse)
    .transpose()
}

pub(in crate::store) fn asset_by_slot(
    conn: &Connection,
    key: &SlotKey,
) -> Result<Option<LogicalAsset>, StoreError> {
    conn.query_row(
        &format!(
            "SELECT {ASSET_COLUMNS} FROM asset WHERE collection_id=?1 AND pointer_type=?2 AND owner_id=?3"
        ),
        params![
            key.collection_id.as_str(),
            key.pointer_type.as_str(),
            key.owner_id
        ],
        RawAsset::read,
    )
    .optional()?
    .map(RawAsset::parse)
    .transpose()
}

pub(in crate::store) fn version_by_id(
    conn: &Connection,
    version_id: i64,
) -> Result<Option<AssetVersion>, StoreError> {
    conn.query_row(
        &format!("SELECT {VERSION_COLUMNS} FROM asset_version WHERE id=?1"),
        params![version_id],
        RawVersion::read,
    )
    .optional()?
    .map(RawVersion::parse)
    .transpose()
}

/// Newest first.
pub(in crate::store) fn versions_of_asset(
    conn: &Connection,
    asset_id: i64,
) -> Result<Vec<AssetVersion>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {VERSION_COLUMNS} FROM asset_version WHERE asset_id=?1 ORDER BY version_no DESC"
    ))?;
    let rows = stmt.query_map(params![asset_id], RawVersion::read)?;
    let mut out = Vec::new();
    for raw in rows {
        out.push(raw?.parse()?);
    }
    Ok(out)
}

pub(in crate::store) fn current_version_id(
    conn: &Connection,
    key: &SlotKey,
) -> Result<Option<i64>, StoreError> {
    Ok(conn
        .query_row(
            "SELECT version_id FROM current_pointer WHERE collection_id=?1 AND pointer_type=?2 AND owner_id=?3",
            params![
                key.collection_id.as_str(),
                key.pointer_type.as_str(),
                key.owner_id
            ],
            |row| row.get::<_, i64>(0),
        )
        .optional()?)
}

/// Active items in ordinal order.
pub(in crate::store) fn active_items(
    conn: &Connection,
    parent_id: &CollectionId,
) -> Result<Vec<OrderedItem>, StoreError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ITEM_COLUMNS} FROM ordered_item \
         WHERE parent_id=?1 AND deleted_at_ms IS NULL \
         ORDER BY ordinal ASC, id ASC"
    ))?;
    let rows = stmt.query_map(params![parent_id.as_str()], RawItem::read)?;
    let mut out = Vec::new();
    for raw in rows {
        out.push(raw?.parse()?);
    }
    Ok(out)
}

pub(in crate::store) fn active_item_ids(
    conn: &Connection,
    parent_id: &CollectionId,
) -> Result<Vec<i64>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT id FROM ordered_item \
         WHERE parent_id=?1 AND deleted_at_ms IS NULL \
         ORDER BY ordinal ASC, id ASC",
    )?;
    let rows = stmt.query_map(params![parent_id.as_str()], |row| row.get::<_, i64>(0))?;
    Ok(rows.collect::<Result<Vec<_>, _>>()?)
}

pub(in crate::store) fn parent_revision(
    conn: &Connection,
    parent_id: &CollectionId,
) -> Result<i64, StoreError> {
    Ok(conn
        .query_row(
            "SELECT revision FROM ordered_parent WHERE parent_id=?1",
            params![parent_id.as_str()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .unwrap_or(0))
}
