#![forbid(unsafe_code)]

use super::*;
use rusqlite::params;
use sl_core::ids::CollectionId;
use sl_core::model::{AssetScope, SlotKey};

impl SqliteStore {
    /// Creates the logical asset for a slot. A slot holds at most one asset.
    pub fn create_asset(&mut self, scope: &AssetScope) -> Result<LogicalAsset, StoreError> {
        validate_owner_id(scope.owner_id)?;
        let pointer_type = scope_pointer_type(scope)?;

        let now_ms = now_ms();
        let tx = begin_write(&mut self.conn)?;
        let asset = insert_asset_tx(&tx, scope, pointer_type, now_ms)?;
        tx.commit()?;

        info!(
            collection_id = %asset.collection_id,
            asset_id = asset.id,
            pointer_type = asset.pointer_type.as_str(),
            owner_id = asset.owner_id,
            "asset created"
        );
        Ok(asset)
    }

    pub fn find_asset(&self, key: &SlotKey) -> Result<Option<LogicalAsset>, StoreError> {
        validate_owner_id(key.owner_id)?;
        asset_by_slot(&self.conn, key)
    }

    pub fn get_asset(
        &self,
        collection_id: &CollectionId,
        asset_id: i64,
    ) -> Result<LogicalAsset, StoreError> {
        owned_asset(&self.conn, collection_id, asset_id)
    }

    /// Inserts `version_no = max + 1` for the asset. Existing versions are never touched.
    pub fn append_version(
        &mut self,
        request: AppendVersionRequest,
    ) -> Result<AssetVersion, StoreError> {
        let draft = normalize_draft(request.draft)?;

        let now_ms = now_ms();
        let tx = begin_write(&mut self.conn)?;
        let asset = owned_asset(&tx, &request.collection_id, request.asset_id)?;
        let version = insert_version_tx(&tx, asset.id, &draft, now_ms)?;
        tx.commit()?;

        info!(
            collection_id = %asset.collection_id,
            asset_id = asset.id,
            version_id = version.id,
            version_no = version.version_no,
            status = version.status.as_str(),
            "version appended"
        );
        Ok(version)
    }

    /// Newest first.
    pub fn list_versions(
        &self,
        collection_id: &CollectionId,
        asset_id: i64,
    ) -> Result<Vec<AssetVersion>, StoreError> {
        let asset = owned_asset(&self.conn, collection_id, asset_id)?;
        versions_of_asset(&self.conn, asset.id)
    }

    pub fn get_version(
        &self,
        collection_id: &CollectionId,
        version_id: i64,
    ) -> Result<AssetVersion, StoreError> {
        let (_, version) = owned_version(&self.conn, collection_id, version_id)?;
        Ok(version)
    }

    /// Deletes an asset together with its versions and its slot pointer.
    /// Returns how many versions went with it.
    pub fn destroy_asset(
        &mut self,
        collection_id: &CollectionId,
        asset_id: i64,
    ) -> Result<usize, StoreError> {
        let tx = begin_write(&mut self.conn)?;
        let asset = owned_asset(&tx, collection_id, asset_id)?;

        let versions = tx.query_row(
            "SELECT COUNT(*) FROM asset_version WHERE asset_id=?1",
            params![asset.id],
            |row| row.get::<_, i64>(0),
        )?;
        let pointers = delete_pointer_tx(&tx, &asset.slot())?;
        tx.execute("DELETE FROM asset WHERE id=?1", params![asset.id])?;
        tx.commit()?;

        info!(
            collection_id = %asset.collection_id,
            asset_id = asset.id,
            versions,
            pointers,
            "asset destroyed"
        );
        usize::try_from(versions).map_err(|_| StoreError::InvalidInput("numeric overflow"))
    }
}
