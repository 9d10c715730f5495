#![forbid(unsafe_code)]

use sl_core::ids::CollectionId;
use sl_core::model::{
    ContentKind, DisplayStatus, OwnerKind, PointerType, SlotKey, VersionSource, VersionStatus,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalAsset {
    pub id: i64,
    pub collection_id: CollectionId,
    pub owner_kind: OwnerKind,
    pub owner_id: i64,
    pub content_kind: ContentKind,
    pub pointer_type: PointerType,
    pub created_at_ms: i64,
}

impl LogicalAsset {
    pub fn slot(&self) -> SlotKey {
        SlotKey::new(self.collection_id.clone(), self.pointer_type, self.owner_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetVersion {
    pub id: i64,
    pub asset_id: i64,
    pub version_no: i64,
    pub source: VersionSource,
    pub status: VersionStatus,
    pub location: Option<String>,
    pub object_key: Option<String>,
    pub provider: Option<String>,
    pub prompt: Option<String>,
    pub params_json: Option<String>,
    pub created_by: Option<i64>,
    pub created_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PointerChange {
    pub previous_version_id: Option<i64>,
    pub version_id: i64,
}

impl PointerChange {
    pub fn changed(&self) -> bool {
        self.previous_version_id != Some(self.version_id)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedContent {
    pub asset_id: i64,
    pub version_id: i64,
    pub version_no: i64,
    pub asset_created: bool,
    pub adopted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettledVersion {
    pub version: AssetVersion,
    pub adopted: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub version: AssetVersion,
    pub is_current: bool,
}

/// Newest-first history of one slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionHistory {
    pub asset: Option<LogicalAsset>,
    pub current_version_id: Option<i64>,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetStatus {
    pub asset_id: Option<i64>,
    pub current_version_id: Option<i64>,
    pub current_location: Option<String>,
    pub status: DisplayStatus,
    pub total_versions: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderedItem {
    pub id: i64,
    pub parent_id: CollectionId,
    pub ordinal: i64,
    pub payload: String,
    pub created_at_ms: i64,
    pub updated_at_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppendedItem {
    pub item_id: i64,
    pub ordinal: i64,
    pub revision: i64,
}

/// Active items of a parent right after a structural change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SequenceSnapshot {
    pub revision: i64,
    pub items: Vec<OrderedItem>,
}

impl SequenceSnapshot {
    pub fn item_ids(&self) -> Vec<i64> {
        self.items.iter().map(|item| item.id).collect()
    }
}
