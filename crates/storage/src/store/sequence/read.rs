use super::super::*;
use sl_core::ids::CollectionId;

impl SqliteStore {
    /// Active items in ordinal order.
    pub fn sequence_list(&self, parent_id: &CollectionId) -> Result<Vec<OrderedItem>, StoreError> {
        active_items(&self.conn, parent_id)
    }

    pub fn sequence_get(
        &self,
        parent_id: &CollectionId,
        item_id: i64,
    ) -> Result<OrderedItem, StoreError> {
        owned_item(&self.conn, parent_id, item_id)
    }

    /// 0 until the first structural change.
    pub fn sequence_revision(&self, parent_id: &CollectionId) -> Result<i64, StoreError> {
        parent_revision(&self.conn, parent_id)
    }
}
