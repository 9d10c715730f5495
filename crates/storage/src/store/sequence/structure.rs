use super::super::*;
use rusqlite::params;
use sl_core::ids::CollectionId;

impl SqliteStore {
    /// Appends an item at the end of its parent. The parent's ordinals are
    /// compacted in the same transaction, so the new item lands at `N`.
    pub fn sequence_append(&mut self, request: AppendItemRequest) -> Result<AppendedItem, StoreError> {
        validate_payload(&request.payload)?;
        let parent_id = request.parent_id;
        let temp_offset = self.config.temp_ordinal_offset;

        let now_ms = now_ms();
        let tx = begin_write(&mut self.conn)?;
        let revision = check_parent_revision_tx(&tx, &parent_id, request.expected_revision)?;

        let slot = max_ordinal_tx(&tx, &parent_id)?
            .checked_add(1)
            .ok_or(StoreError::InvalidInput("ordinal overflow"))?;
        tx.execute(
            r#"
            INSERT INTO ordered_item(parent_id, ordinal, payload, created_at_ms, updated_at_ms)
            VALUES (?1, ?2, ?3, ?4, ?4)
            "#,
            params![parent_id.as_str(), slot, request.payload, now_ms],
        )?;
        let item_id = tx.last_insert_rowid();

        let order = active_item_ids(&tx, &parent_id)?;
        renumber_parent_tx(&tx, &parent_id, &order, temp_offset, now_ms)?;
        let revision = bump_parent_revision_tx(&tx, &parent_id, revision, now_ms)?;
        let ordinal = i64::try_from(order.len())
            .map_err(|_| StoreError::InvalidInput("numeric overflow"))?;
        tx.commit()?;

        info!(parent_id = %parent_id, item_id, ordinal, revision, "item appended");
        Ok(AppendedItem {
            item_id,
            ordinal,
            revision,
        })
    }

    /// Soft-deletes an item, then renumbers the survivors to close the gap.
    pub fn sequence_remove(
        &mut self,
        request: RemoveItemRequest,
    ) -> Result<SequenceSnapshot, StoreError> {
        let parent_id = request.parent_id;
        let temp_offset = self.config.temp_ordinal_offset;

        let now_ms = now_ms();
        let tx = begin_write(&mut self.conn)?;
        let revision = check_parent_revision_tx(&tx, &parent_id, request.expected_revision)?;
        let item = owned_item(&tx, &parent_id, request.item_id)?;

        tx.execute(
            "UPDATE ordered_item SET deleted_at_ms=?2, updated_at_ms=?2 WHERE id=?1",
            params![item.id, now_ms],
        )?;
        let order = active_item_ids(&tx, &parent_id)?;
        renumber_parent_tx(&tx, &parent_id, &order, temp_offset, now_ms)?;
        let revision = bump_parent_revision_tx(&tx, &parent_id, revision, now_ms)?;
        let items = active_items(&tx, &parent_id)?;
        tx.commit()?;

        info!(
            parent_id = %parent_id,
            item_id = item.id,
            items = items.len(),
            revision,
            "item removed"
        );
        Ok(SequenceSnapshot { revision, items })
    }

    /// Assigns ordinals `1..=N` in the order given. The list must name every
    /// active item of the parent exactly once; otherwise nothing is written.
    pub fn sequence_reorder(
        &mut self,
        request: ReorderItemsRequest,
    ) -> Result<SequenceSnapshot, StoreError> {
        let parent_id = request.parent_id;
        let temp_offset = self.config.temp_ordinal_offset;

        let now_ms = now_ms();
        let tx = begin_write(&mut self.conn)?;
        let revision = check_parent_revision_tx(&tx, &parent_id, request.expected_revision)?;
        let active = active_item_ids(&tx, &parent_id)?;
        ensure_same_item_set(&active, &request.ordered_item_ids)?;

        if active.is_empty() {
            return Ok(SequenceSnapshot {
                revision,
                items: Vec::new(),
            });
        }

        renumber_parent_tx(&tx, &parent_id, &request.ordered_item_ids, temp_offset, now_ms)?;
        let revision = bump_parent_revision_tx(&tx, &parent_id, revision, now_ms)?;
        let items = active_items(&tx, &parent_id)?;
        tx.commit()?;

        info!(parent_id = %parent_id, items = items.len(), revision, "items reordered");
        Ok(SequenceSnapshot { revision, items })
    }

    /// Replaces an item's payload. Position and parent revision are unaffected.
    pub fn sequence_update_payload(
        &mut self,
        parent_id: &CollectionId,
        item_id: i64,
        payload: &str,
    ) -> Result<OrderedItem, StoreError> {
        validate_payload(payload)?;

        let now_ms = now_ms();
        let tx = begin_write(&mut self.conn)?;
        let mut item = owned_item(&tx, parent_id, item_id)?;
        tx.execute(
            "UPDATE ordered_item SET payload=?2, updated_at_ms=?3 WHERE id=?1",
            params![item.id, payload, now_ms],
        )?;
        tx.commit()?;

        debug!(parent_id = %parent_id, item_id, "item payload updated");
        item.payload = payload.to_string();
        item.updated_at_ms = now_ms;
        Ok(item)
    }
}
