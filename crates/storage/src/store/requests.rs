#![forbid(unsafe_code)]

use sl_core::ids::CollectionId;
use sl_core::model::{AssetScope, VersionSource, VersionStatus};

/// Content fields of a version about to be appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionDraft {
    pub source: VersionSource,
    pub status: VersionStatus,
    pub location: Option<String>,
    pub provider: Option<String>,
    pub prompt: Option<String>,
    pub params_json: Option<String>,
    pub created_by: Option<i64>,
}

impl VersionDraft {
    pub fn ready(source: VersionSource, location: impl Into<String>) -> Self {
        Self {
            source,
            status: VersionStatus::Ready,
            location: Some(location.into()),
            provider: None,
            prompt: None,
            params_json: None,
            created_by: None,
        }
    }

    /// Placeholder for content still being produced.
    pub fn pending(source: VersionSource) -> Self {
        Self {
            source,
            status: VersionStatus::Pending,
            location: None,
            provider: None,
            prompt: None,
            params_json: None,
            created_by: None,
        }
    }

    pub fn failed(source: VersionSource) -> Self {
        Self {
            status: VersionStatus::Failed,
            ..Self::pending(source)
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_params_json(mut self, params_json: impl Into<String>) -> Self {
        self.params_json = Some(params_json.into());
        self
    }

    pub fn created_by(mut self, user_id: i64) -> Self {
        self.created_by = Some(user_id);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppendVersionRequest {
    pub collection_id: CollectionId,
    pub asset_id: i64,
    pub draft: VersionDraft,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordContentRequest {
    pub scope: AssetScope,
    pub draft: VersionDraft,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettleVersionRequest {
    pub collection_id: CollectionId,
    pub version_id: i64,
    pub status: VersionStatus,
    /// Required when settling to ready unless the pending row already has one.
    pub location: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UploadRequest {
    pub scope: AssetScope,
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub created_by: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppendItemRequest {
    pub parent_id: CollectionId,
    pub payload: String,
    pub expected_revision: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoveItemRequest {
    pub parent_id: CollectionId,
    pub item_id: i64,
    pub expected_revision: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReorderItemsRequest {
    pub parent_id: CollectionId,
    /// Complete target order; must name every active item exactly once.
    pub ordered_item_ids: Vec<i64>,
    pub expected_revision: Option<i64>,
}
