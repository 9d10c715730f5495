#![forbid(unsafe_code)]

mod config;
mod error;
mod lifecycle;
mod pointers;
mod requests;
mod sequence;
mod support;
mod types;
mod versions;

pub use config::*;
pub use error::{ErrorKind, StoreError};
pub use requests::*;
pub use types::*;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::path::{Path, PathBuf};
use std::time::Duration;
use support::*;
use tracing::{debug, info};

#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
    storage_dir: PathBuf,
    config: StoreConfig,
}

impl SqliteStore {
    pub fn open(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Self::open_with_config(StoreConfig::with_storage_dir(storage_dir.as_ref()))
    }

    pub fn open_with_config(config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;
        let storage_dir = config.storage_dir.clone();
        std::fs::create_dir_all(&storage_dir)?;

        let db_path = config.db_path();
        let conn = Connection::open(&db_path)?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let journal_mode =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get::<_, String>(0))?;
        debug!(db_path = %db_path.display(), journal_mode = %journal_mode, "opened database");

        preflight_gate(&conn)?;
        install_schema(&conn, now_ms())?;
        info!(db_path = %db_path.display(), "store ready");

        Ok(Self {
            conn,
            storage_dir,
            config,
        })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

/// Opens a write transaction holding SQLite's reserved lock from the first statement.
fn begin_write(conn: &mut Connection) -> Result<Transaction<'_>, StoreError> {
    Ok(conn.transaction_with_behavior(TransactionBehavior::Immediate)?)
}
