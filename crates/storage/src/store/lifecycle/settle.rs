use super::super::*;
use super::record::adopt_if_unset_tx;
use rusqlite::params;
use sl_core::blob::object_key;
use sl_core::model::VersionStatus;

impl SqliteStore {
    /// Moves a PENDING version to READY or FAILED. This is the only in-place
    /// change a version row admits, and it happens at most once.
    pub fn settle_version(
        &mut self,
        request: SettleVersionRequest,
    ) -> Result<SettledVersion, StoreError> {
        let location = normalize_location(request.location)?;

        let now_ms = now_ms();
        let tx = begin_write(&mut self.conn)?;
        let (asset, mut version) = owned_version(&tx, &request.collection_id, request.version_id)?;
        if !version.status.can_transition_to(request.status) {
            return Err(StoreError::InvalidStatusTransition {
                from: version.status.as_str(),
                to: request.status.as_str(),
            });
        }

        let location = location.or(version.location.take());
        if request.status == VersionStatus::Ready && location.is_none() {
            return Err(StoreError::InvalidInput("ready version requires a location"));
        }
        let key = location.as_deref().and_then(object_key);

        tx.execute(
            "UPDATE asset_version SET status=?2, location=?3, object_key=?4 WHERE id=?1 AND status=?5",
            params![
                version.id,
                request.status.as_str(),
                location.as_deref(),
                key.as_deref(),
                VersionStatus::Pending.as_str()
            ],
        )?;
        version.status = request.status;
        version.location = location;
        version.object_key = key;

        let adopted = adopt_if_unset_tx(&tx, &asset.slot(), &version, now_ms)?;
        tx.commit()?;

        info!(
            collection_id = %asset.collection_id,
            asset_id = asset.id,
            version_id = version.id,
            status = version.status.as_str(),
            adopted,
            "version settled"
        );
        Ok(SettledVersion { version, adopted })
    }
}
