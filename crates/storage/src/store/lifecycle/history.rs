use super::super::*;
use sl_core::model::{DisplayStatus, SlotKey, VersionStatus};

impl SqliteStore {
    /// Every version of the slot, newest first, with the current one flagged.
    pub fn version_history(&self, key: &SlotKey) -> Result<VersionHistory, StoreError> {
        validate_owner_id(key.owner_id)?;
        let Some(asset) = asset_by_slot(&self.conn, key)? else {
            return Ok(VersionHistory {
                asset: None,
                current_version_id: None,
                entries: Vec::new(),
            });
        };

        let current_version_id = current_version_id(&self.conn, key)?;
        let entries = versions_of_asset(&self.conn, asset.id)?
            .into_iter()
            .map(|version| HistoryEntry {
                is_current: Some(version.id) == current_version_id,
                version,
            })
            .collect();
        Ok(VersionHistory {
            asset: Some(asset),
            current_version_id,
            entries,
        })
    }

    /// The version a consumer should show: the current one, else the newest READY.
    pub fn display_version(&self, key: &SlotKey) -> Result<Option<AssetVersion>, StoreError> {
        validate_owner_id(key.owner_id)?;
        let Some(asset) = asset_by_slot(&self.conn, key)? else {
            return Ok(None);
        };
        let current = current_version_id(&self.conn, key)?;
        let versions = versions_of_asset(&self.conn, asset.id)?;
        Ok(pick_display(current, versions))
    }

    pub fn asset_status(&self, key: &SlotKey) -> Result<AssetStatus, StoreError> {
        validate_owner_id(key.owner_id)?;
        let Some(asset) = asset_by_slot(&self.conn, key)? else {
            return Ok(AssetStatus::empty());
        };
        let versions = versions_of_asset(&self.conn, asset.id)?;
        let Some(newest) = versions.first() else {
            return Ok(AssetStatus::empty());
        };

        let status = match newest.status {
            VersionStatus::Pending => DisplayStatus::Generating,
            VersionStatus::Ready => DisplayStatus::Ready,
            VersionStatus::Failed => DisplayStatus::Failed,
        };
        let total_versions = i64::try_from(versions.len())
            .map_err(|_| StoreError::InvalidInput("numeric overflow"))?;
        let current = current_version_id(&self.conn, key)?;
        let shown = pick_display(current, versions);

        Ok(AssetStatus {
            asset_id: Some(asset.id),
            current_version_id: shown.as_ref().map(|version| version.id),
            current_location: shown.and_then(|version| version.location),
            status,
            total_versions,
        })
    }
}

impl AssetStatus {
    fn empty() -> Self {
        Self {
            asset_id: None,
            current_version_id: None,
            current_location: None,
            status: DisplayStatus::None,
            total_versions: 0,
        }
    }
}

/// `versions` must be newest first.
fn pick_display(current: Option<i64>, versions: Vec<AssetVersion>) -> Option<AssetVersion> {
    if let Some(current) = current
        && let Some(version) = versions.iter().find(|version| version.id == current)
    {
        return Some(version.clone());
    }
    versions
        .into_iter()
        .find(|version| version.status == VersionStatus::Ready)
}
