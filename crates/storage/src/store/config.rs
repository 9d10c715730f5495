#![forbid(unsafe_code)]

use super::StoreError;
use serde::Deserialize;
use sl_core::blob::DEFAULT_MAX_UPLOAD_BYTES;
use std::path::PathBuf;

pub const STORAGE_DIR_ENV: &str = "STORYLEDGER_STORAGE_DIR";
pub const BUSY_TIMEOUT_ENV: &str = "STORYLEDGER_BUSY_TIMEOUT_MS";
pub const MAX_UPLOAD_BYTES_ENV: &str = "STORYLEDGER_MAX_UPLOAD_BYTES";

const DEFAULT_STORAGE_DIR: &str = ".storyledger";
const DEFAULT_DB_FILE_NAME: &str = "storyledger.db";
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_TEMP_ORDINAL_OFFSET: i64 = 1_000;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub storage_dir: PathBuf,
    pub db_file_name: String,
    pub busy_timeout_ms: u64,
    /// Distance above the parent's max ordinal where phase-1 renumbering parks rows.
    pub temp_ordinal_offset: i64,
    pub max_upload_bytes: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            db_file_name: DEFAULT_DB_FILE_NAME.to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            temp_ordinal_offset: DEFAULT_TEMP_ORDINAL_OFFSET,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl StoreConfig {
    pub fn with_storage_dir(storage_dir: impl Into<PathBuf>) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            ..Self::default()
        }
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, StoreError> {
        let config: Self =
            serde_yaml::from_str(raw).map_err(|err| StoreError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `STORYLEDGER_*` environment variables.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, StoreError> {
        let mut config = Self::default();
        if let Some(dir) = lookup(STORAGE_DIR_ENV).filter(|value| !value.trim().is_empty()) {
            config.storage_dir = PathBuf::from(dir.trim());
        }
        if let Some(raw) = lookup(BUSY_TIMEOUT_ENV) {
            config.busy_timeout_ms = parse_u64(BUSY_TIMEOUT_ENV, &raw)?;
        }
        if let Some(raw) = lookup(MAX_UPLOAD_BYTES_ENV) {
            config.max_upload_bytes = parse_u64(MAX_UPLOAD_BYTES_ENV, &raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), StoreError> {
        let name = self.db_file_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(StoreError::Config(
                "db_file_name must be a bare file name".to_string(),
            ));
        }
        if self.temp_ordinal_offset < 1 {
            return Err(StoreError::Config(
                "temp_ordinal_offset must be at least 1".to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(StoreError::Config(
                "max_upload_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn db_path(&self) -> PathBuf {
        self.storage_dir.join(&self.db_file_name)
    }
}

fn parse_u64(key: &str, raw: &str) -> Result<u64, StoreError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| StoreError::Config(format!("{key} must be an unsigned integer")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn yaml_overrides_only_named_fields() {
        let config = StoreConfig::from_yaml_str(
            "storage_dir: /tmp/ledger\nbusy_timeout_ms: 250\n",
        )
        .expect("yaml config");
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/ledger"));
        assert_eq!(config.busy_timeout_ms, 250);
        assert_eq!(config.temp_ordinal_offset, DEFAULT_TEMP_ORDINAL_OFFSET);
        assert_eq!(config.db_path(), PathBuf::from("/tmp/ledger/storyledger.db"));
    }

    #[test]
    fn yaml_rejects_unknown_fields_and_bad_offsets() {
        let err = StoreConfig::from_yaml_str("storage_dirr: x\n").expect_err("typo must fail");
        assert_eq!(err.code(), "INVALID_CONFIG");

        let err = StoreConfig::from_yaml_str("temp_ordinal_offset: 0\n")
            .expect_err("offset must be positive");
        assert_eq!(err.code(), "INVALID_CONFIG");
    }

    #[test]
    fn env_lookup_parses_numbers() {
        let env: HashMap<&str, &str> = [
            (STORAGE_DIR_ENV, " /var/lib/ledger "),
            (BUSY_TIMEOUT_ENV, "42"),
            (MAX_UPLOAD_BYTES_ENV, "1024"),
        ]
        .into_iter()
        .collect();
        let config = StoreConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()))
            .expect("env config");
        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/ledger"));
        assert_eq!(config.busy_timeout_ms, 42);
        assert_eq!(config.max_upload_bytes, 1024);

        let err = StoreConfig::from_lookup(|key| {
            (key == BUSY_TIMEOUT_ENV).then(|| "soon".to_string())
        })
        .expect_err("non-numeric timeout");
        assert!(matches!(err, StoreError::Config(_)));
    }
}
