#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        -- One logical asset per slot; identity columns are never updated.
        CREATE TABLE IF NOT EXISTS asset (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          collection_id TEXT NOT NULL,
          owner_kind TEXT NOT NULL,
          owner_id INTEGER NOT NULL,
          content_kind TEXT NOT NULL,
          pointer_type TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          UNIQUE(collection_id, pointer_type, owner_id)
        );

        -- Append-only. `status` settles once from PENDING; nothing else changes.
        CREATE TABLE IF NOT EXISTS asset_version (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          asset_id INTEGER NOT NULL,
          version_no INTEGER NOT NULL CHECK(version_no >= 1),
          source TEXT NOT NULL,
          status TEXT NOT NULL CHECK(status IN ('PENDING', 'READY', 'FAILED')),
          location TEXT,
          object_key TEXT,
          provider TEXT,
          prompt TEXT,
          params_json TEXT,
          created_by INTEGER,
          created_at_ms INTEGER NOT NULL,
          UNIQUE(asset_id, version_no),
          FOREIGN KEY(asset_id) REFERENCES asset(id) ON DELETE CASCADE
        );

        CREATE TABLE IF NOT EXISTS current_pointer (
          collection_id TEXT NOT NULL,
          pointer_type TEXT NOT NULL,
          owner_id INTEGER NOT NULL,
          version_id INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          PRIMARY KEY(collection_id, pointer_type, owner_id),
          FOREIGN KEY(version_id) REFERENCES asset_version(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_current_pointer_version
          ON current_pointer(version_id);
"#;
