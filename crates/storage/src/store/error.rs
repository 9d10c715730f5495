#![forbid(unsafe_code)]

use thiserror::Error;

/// Coarse failure class callers branch on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed request, or a request that contradicts stored state
    /// (stale revision, slot already taken).
    Validation,
    NotFound,
    /// A uniqueness constraint fired inside a write that should never collide.
    /// Always an invariant breach, never a caller condition.
    Conflict,
    /// The store itself is unavailable or unusable; retry belongs to the caller.
    Storage,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("blob store: {0}")]
    Blob(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("config: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("scope mismatch: {0}")]
    ScopeMismatch(&'static str),
    #[error("upload rejected: {0}")]
    UploadRejected(&'static str),
    #[error("reorder set mismatch (active={active}, supplied={supplied})")]
    ReorderSetMismatch { active: usize, supplied: usize },
    #[error("version {version_id} does not belong to asset {asset_id}")]
    VersionOutsideAsset { version_id: i64, asset_id: i64 },
    #[error("version {version_id} is {status} and cannot be adopted")]
    VersionNotAdoptable { version_id: i64, status: &'static str },
    #[error("invalid status transition ({from} -> {to})")]
    InvalidStatusTransition { from: &'static str, to: &'static str },
    #[error("revision mismatch (expected={expected}, actual={actual})")]
    RevisionMismatch { expected: i64, actual: i64 },
    #[error("ordinal conflict (parent={parent_id}, ordinal={ordinal})")]
    OrdinalConflict { parent_id: String, ordinal: i64 },
    #[error("version number conflict (asset={asset_id}, version_no={version_no})")]
    VersionNumberConflict { asset_id: i64, version_no: i64 },
    #[error("asset already exists for slot (asset={asset_id})")]
    AssetAlreadyExists { asset_id: i64 },
    #[error("unknown asset")]
    UnknownAsset,
    #[error("unknown version")]
    UnknownVersion,
    #[error("unknown item")]
    UnknownItem,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::Sql(_) | Self::Blob(_) => ErrorKind::Storage,
            Self::InvalidInput(message) if is_reset_required(message) => ErrorKind::Storage,
            Self::Config(_)
            | Self::InvalidInput(_)
            | Self::ScopeMismatch(_)
            | Self::UploadRejected(_)
            | Self::ReorderSetMismatch { .. }
            | Self::VersionOutsideAsset { .. }
            | Self::VersionNotAdoptable { .. }
            | Self::InvalidStatusTransition { .. }
            | Self::RevisionMismatch { .. }
            | Self::AssetAlreadyExists { .. } => ErrorKind::Validation,
            Self::OrdinalConflict { .. } | Self::VersionNumberConflict { .. } => {
                ErrorKind::Conflict
            }
            Self::UnknownAsset | Self::UnknownVersion | Self::UnknownItem => ErrorKind::NotFound,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) | Self::Sql(_) | Self::Blob(_) => "STORAGE",
            Self::InvalidInput(message) if is_reset_required(message) => "RESET_REQUIRED",
            Self::Config(_) => "INVALID_CONFIG",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::ScopeMismatch(_) => "SCOPE_MISMATCH",
            Self::UploadRejected(_) => "UPLOAD_REJECTED",
            Self::ReorderSetMismatch { .. } => "REORDER_SET_MISMATCH",
            Self::VersionOutsideAsset { .. } => "VERSION_OUTSIDE_ASSET",
            Self::VersionNotAdoptable { .. } => "VERSION_NOT_ADOPTABLE",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::RevisionMismatch { .. } => "REVISION_MISMATCH",
            Self::OrdinalConflict { .. } => "ORDINAL_CONFLICT",
            Self::VersionNumberConflict { .. } => "VERSION_NUMBER_CONFLICT",
            Self::AssetAlreadyExists { .. } => "ALREADY_EXISTS",
            Self::UnknownAsset | Self::UnknownVersion | Self::UnknownItem => "NOT_FOUND",
        }
    }
}

fn is_reset_required(message: &str) -> bool {
    message.starts_with("RESET_REQUIRED")
}
