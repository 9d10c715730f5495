#![forbid(unsafe_code)]

//! Two-phase renumbering of a parent's active items.
//!
//! `(parent_id, ordinal)` is unique across every row, soft-deleted ones
//! included, so writing final ordinals directly can collide with a value a
//! sibling still holds. The renumber therefore:
//!
//! 1. purges the parent's soft-deleted rows,
//! 2. parks every active row at `max_ordinal + offset + position`, a range no
//!    row currently occupies and no final ordinal can reach,
//! 3. writes the final ordinals `1..=N` in target order.
//!
//! All three steps run inside the caller's transaction; any error drops it and
//! nothing of the renumber survives.

use super::super::StoreError;
use super::guards::is_unique_violation;
use super::rows::active_item_ids;
use rusqlite::{OptionalExtension, Transaction, params};
use sl_core::ids::CollectionId;
use std::collections::BTreeSet;
use tracing::{debug, error};

pub(in crate::store) fn renumber_parent_tx(
    tx: &Transaction<'_>,
    parent_id: &CollectionId,
    target_order: &[i64],
    temp_offset: i64,
    now_ms: i64,
) -> Result<(), StoreError> {
    let purged = purge_soft_deleted_tx(tx, parent_id)?;
    if purged > 0 {
        debug!(parent_id = %parent_id, purged, "purged soft-deleted items");
    }

    let active = active_item_ids(tx, parent_id)?;
    ensure_same_item_set(&active, target_order)?;
    if target_order.is_empty() {
        return Ok(());
    }

    let max_ordinal = max_ordinal_tx(tx, parent_id)?;
    let temp_base = max_ordinal
        .checked_add(temp_offset)
        .ok_or(StoreError::InvalidInput("ordinal overflow"))?;

    for (position, item_id) in target_order.iter().enumerate() {
        let temp = temp_base
            .checked_add(position_ordinal(position)?)
            .ok_or(StoreError::InvalidInput("ordinal overflow"))?;
        set_ordinal_tx(tx, parent_id, *item_id, temp, None)?;
    }
    debug!(parent_id = %parent_id, items = target_order.len(), temp_base, "renumber phase 1 done");

    for (position, item_id) in target_order.iter().enumerate() {
        let ordinal = position_ordinal(position)? + 1;
        set_ordinal_tx(tx, parent_id, *item_id, ordinal, Some(now_ms))?;
    }
    debug!(parent_id = %parent_id, items = target_order.len(), "renumber phase 2 done");

    Ok(())
}

/// Highest ordinal held by any row of the parent, deleted or not; 0 when empty.
pub(in crate::store) fn max_ordinal_tx(
    tx: &Transaction<'_>,
    parent_id: &CollectionId,
) -> Result<i64, StoreError> {
    Ok(tx
        .query_row(
            "SELECT MAX(ordinal) FROM ordered_item WHERE parent_id=?1",
            params![parent_id.as_str()],
            |row| row.get::<_, Option<i64>>(0),
        )?
        .unwrap_or(0))
}

/// Checks `expected` against the stored parent revision. Reads only.
pub(in crate::store) fn check_parent_revision_tx(
    tx: &Transaction<'_>,
    parent_id: &CollectionId,
    expected: Option<i64>,
) -> Result<i64, StoreError> {
    let current = tx
        .query_row(
            "SELECT revision FROM ordered_parent WHERE parent_id=?1",
            params![parent_id.as_str()],
            |row| row.get::<_, i64>(0),
        )
        .optional()?
        .unwrap_or(0);

    if let Some(expected) = expected
        && expected != current
    {
        return Err(StoreError::RevisionMismatch {
            expected,
            actual: current,
        });
    }
    Ok(current)
}

pub(in crate::store) fn bump_parent_revision_tx(
    tx: &Transaction<'_>,
    parent_id: &CollectionId,
    current: i64,
    now_ms: i64,
) -> Result<i64, StoreError> {
    let next = current + 1;
    tx.execute(
        r#"
        INSERT INTO ordered_parent(parent_id, revision, updated_at_ms) VALUES (?1, ?2, ?3)
        ON CONFLICT(parent_id) DO UPDATE SET revision=excluded.revision, updated_at_ms=excluded.updated_at_ms
        "#,
        params![parent_id.as_str(), next, now_ms],
    )?;
    Ok(next)
}

fn purge_soft_deleted_tx(tx: &Transaction<'_>, parent_id: &CollectionId) -> Result<usize, StoreError> {
    Ok(tx.execute(
        "DELETE FROM ordered_item WHERE parent_id=?1 AND deleted_at_ms IS NOT NULL",
        params![parent_id.as_str()],
    )?)
}

fn set_ordinal_tx(
    tx: &Transaction<'_>,
    parent_id: &CollectionId,
    item_id: i64,
    ordinal: i64,
    touched_at_ms: Option<i64>,
) -> Result<(), StoreError> {
    let updated = match touched_at_ms {
        Some(now_ms) => tx.execute(
            "UPDATE ordered_item SET ordinal=?3, updated_at_ms=?4 \
             WHERE parent_id=?1 AND id=?2 AND deleted_at_ms IS NULL",
            params![parent_id.as_str(), item_id, ordinal, now_ms],
        ),
        None => tx.execute(
            "UPDATE ordered_item SET ordinal=?3 \
             WHERE parent_id=?1 AND id=?2 AND deleted_at_ms IS NULL",
            params![parent_id.as_str(), item_id, ordinal],
        ),
    };

    match updated {
        Ok(1) => Ok(()),
        Ok(_) => {
            error!(parent_id = %parent_id, item_id, "renumber target vanished mid-transaction");
            Err(StoreError::UnknownItem)
        }
        Err(err) if is_unique_violation(&err) => {
            error!(parent_id = %parent_id, item_id, ordinal, "ordinal uniqueness violated during renumber");
            Err(StoreError::OrdinalConflict {
                parent_id: parent_id.as_str().to_string(),
                ordinal,
            })
        }
        Err(err) => Err(StoreError::Sql(err)),
    }
}

pub(in crate::store) fn ensure_same_item_set(active: &[i64], target_order: &[i64]) -> Result<(), StoreError> {
    let mismatch = || StoreError::ReorderSetMismatch {
        active: active.len(),
        supplied: target_order.len(),
    };
    if active.len() != target_order.len() {
        return Err(mismatch());
    }
    let supplied: BTreeSet<i64> = target_order.iter().copied().collect();
    if supplied.len() != target_order.len() {
        return Err(mismatch());
    }
    if active.iter().any(|id| !supplied.contains(id)) {
        return Err(mismatch());
    }
    Ok(())
}

fn position_ordinal(position: usize) -> Result<i64, StoreError> {
    i64::try_from(position).map_err(|_| StoreError::InvalidInput("numeric overflow"))
}

#[cfg(test)]
mod tests {
    use super::ensure_same_item_set;

    #[test]
    fn same_item_set_requires_exact_permutation() {
        assert!(ensure_same_item_set(&[1, 2, 3], &[3, 1, 2]).is_ok());
        assert!(ensure_same_item_set(&[], &[]).is_ok());
        assert!(ensure_same_item_set(&[1, 2, 3], &[1, 2]).is_err());
        assert!(ensure_same_item_set(&[1, 2, 3], &[1, 2, 2]).is_err());
        assert!(ensure_same_item_set(&[1, 2, 3], &[1, 2, 4]).is_err());
        assert!(ensure_same_item_set(&[1, 2], &[1, 2, 3]).is_err());
    }
}
