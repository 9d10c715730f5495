#![forbid(unsafe_code)]

use super::*;
use sl_core::model::SlotKey;

impl SqliteStore {
    pub fn get_current(&self, key: &SlotKey) -> Result<Option<i64>, StoreError> {
        validate_owner_id(key.owner_id)?;
        current_version_id(&self.conn, key)
    }

    /// Points the slot at `version_id`. The version must be READY and belong to
    /// the asset resolved from the slot; on any failure the pointer is unchanged.
    pub fn set_current(
        &mut self,
        key: &SlotKey,
        version_id: i64,
    ) -> Result<PointerChange, StoreError> {
        validate_owner_id(key.owner_id)?;

        let now_ms = now_ms();
        let tx = begin_write(&mut self.conn)?;
        let change = set_current_tx(&tx, key, version_id, now_ms)?;
        if !change.changed() {
            debug!(
                collection_id = %key.collection_id,
                pointer_type = key.pointer_type.as_str(),
                owner_id = key.owner_id,
                version_id,
                "pointer already current"
            );
            return Ok(change);
        }
        tx.commit()?;

        info!(
            collection_id = %key.collection_id,
            pointer_type = key.pointer_type.as_str(),
            owner_id = key.owner_id,
            previous_version_id = ?change.previous_version_id,
            version_id,
            "pointer moved"
        );
        Ok(change)
    }
}
