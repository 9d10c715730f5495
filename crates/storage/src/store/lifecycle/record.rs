use super::super::*;
use sl_core::model::SlotKey;

impl SqliteStore {
    /// Records one finished piece of content for a slot.
    ///
    /// Creates the slot's asset on first use. A slot without a pointer adopts
    /// its first READY version; once a pointer exists, new versions wait for an
    /// explicit [`SqliteStore::set_current`].
    pub fn record_new_content(
        &mut self,
        request: RecordContentRequest,
    ) -> Result<RecordedContent, StoreError> {
        let scope = request.scope;
        validate_owner_id(scope.owner_id)?;
        let pointer_type = scope_pointer_type(&scope)?;
        let draft = normalize_draft(request.draft)?;
        let key = SlotKey::new(scope.collection_id.clone(), pointer_type, scope.owner_id);

        let now_ms = now_ms();
        let tx = begin_write(&mut self.conn)?;
        let (asset, asset_created) = match asset_by_slot(&tx, &key)? {
            Some(asset) => (asset, false),
            None => (insert_asset_tx(&tx, &scope, pointer_type, now_ms)?, true),
        };
        let version = insert_version_tx(&tx, asset.id, &draft, now_ms)?;
        let adopted = adopt_if_unset_tx(&tx, &key, &version, now_ms)?;
        tx.commit()?;

        info!(
            collection_id = %key.collection_id,
            pointer_type = key.pointer_type.as_str(),
            owner_id = key.owner_id,
            asset_id = asset.id,
            version_no = version.version_no,
            status = version.status.as_str(),
            asset_created,
            adopted,
            "content recorded"
        );
        Ok(RecordedContent {
            asset_id: asset.id,
            version_id: version.id,
            version_no: version.version_no,
            asset_created,
            adopted,
        })
    }

    /// Re-points the slot at an earlier version. Nothing is copied; history is untouched.
    pub fn rollback(
        &mut self,
        key: &SlotKey,
        target_version_id: i64,
    ) -> Result<PointerChange, StoreError> {
        self.set_current(key, target_version_id)
    }
}

/// Points an unset slot at `version` when it is adoptable.
pub(super) fn adopt_if_unset_tx(
    tx: &Transaction<'_>,
    key: &SlotKey,
    version: &AssetVersion,
    now_ms: i64,
) -> Result<bool, StoreError> {
    if !version.status.is_adoptable() || current_version_id(tx, key)?.is_some() {
        return Ok(false);
    }
    upsert_pointer_tx(tx, key, version.id, now_ms)?;
    Ok(true)
}
