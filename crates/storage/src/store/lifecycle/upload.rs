use super::super::*;
use sl_core::blob::{BlobStore, UploadPolicy};
use sl_core::model::VersionSource;
use tracing::warn;

impl SqliteStore {
    /// Stores user-supplied bytes through `blob` and records them as an
    /// UPLOADED, READY version of the slot.
    ///
    /// The upload policy and the slot are checked before any bytes leave the
    /// process. If recording fails after the put, the object is deleted again.
    pub fn record_upload<B: BlobStore>(
        &mut self,
        blob: &B,
        request: UploadRequest,
    ) -> Result<RecordedContent, StoreError> {
        let UploadRequest {
            scope,
            bytes,
            content_type,
            created_by,
        } = request;
        validate_owner_id(scope.owner_id)?;
        scope_pointer_type(&scope)?;

        let policy = UploadPolicy {
            max_bytes: self.config.max_upload_bytes,
        };
        let len = u64::try_from(bytes.len()).unwrap_or(u64::MAX);
        policy
            .check(scope.content_kind, &content_type, len)
            .map_err(|err| StoreError::UploadRejected(err.message()))?;

        let location = blob
            .put(&bytes, content_type.trim())
            .map_err(|err| StoreError::Blob(Box::new(err)))?;

        let mut draft = VersionDraft::ready(VersionSource::Uploaded, location.clone());
        draft.created_by = created_by;
        let recorded = self.record_new_content(RecordContentRequest { scope, draft });

        if let Err(err) = &recorded {
            match blob.delete(&location) {
                Ok(()) => warn!(location = %location, error = %err, "upload not recorded; object deleted"),
                Err(delete_err) => warn!(
                    location = %location,
                    error = %err,
                    delete_error = %delete_err,
                    "upload not recorded; object left behind"
                ),
            }
        }
        recorded
    }
}
