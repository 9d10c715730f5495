#![forbid(unsafe_code)]

//! Boundary of the object store that holds version bytes. The ledger only
//! ever sees the opaque location string a [`BlobStore`] hands back.

use crate::model::ContentKind;

pub trait BlobStore {
    type Error: std::error::Error + Send + Sync + 'static;

    fn put(&self, bytes: &[u8], content_type_hint: &str) -> Result<String, Self::Error>;

    fn get(&self, location: &str) -> Result<Vec<u8>, Self::Error>;

    fn delete(&self, location: &str) -> Result<(), Self::Error>;
}

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadError {
    Empty,
    TooLarge { len: u64, max: u64 },
    UnsupportedType { expected_prefix: &'static str },
}

impl UploadError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "upload must not be empty",
            Self::TooLarge { .. } => "upload exceeds the size limit",
            Self::UnsupportedType { .. } => "upload content type does not match the slot",
        }
    }
}

impl UploadPolicy {
    pub fn check(
        &self,
        content_kind: ContentKind,
        content_type: &str,
        len: u64,
    ) -> Result<(), UploadError> {
        let expected_prefix = content_kind.media_prefix();
        if !content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with(expected_prefix)
        {
            return Err(UploadError::UnsupportedType { expected_prefix });
        }
        if len == 0 {
            return Err(UploadError::Empty);
        }
        if len > self.max_bytes {
            return Err(UploadError::TooLarge {
                len,
                max: self.max_bytes,
            });
        }
        Ok(())
    }
}

/// Path portion of a location URL, e.g.
/// `https://bucket.host/2025/12/28/a.jpg` -> `2025/12/28/a.jpg`.
/// Locations without a scheme are returned as-is when non-empty.
pub fn object_key(location: &str) -> Option<String> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }
    let Some(scheme_end) = location.find("//") else {
        return Some(location.trim_start_matches('/').to_string()).filter(|key| !key.is_empty());
    };
    let after_host = &location[scheme_end + 2..];
    let path_start = after_host.find('/')?;
    let key = &after_host[path_start + 1..];
    let key = key.split(['?', '#']).next().unwrap_or_default();
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}
