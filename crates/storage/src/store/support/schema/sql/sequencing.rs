#![forbid(unsafe_code)]

pub(super) const SQL: &str = r#"

        CREATE TABLE IF NOT EXISTS ordered_parent (
          parent_id TEXT PRIMARY KEY,
          revision INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL
        );

        -- The (parent_id, ordinal) uniqueness covers soft-deleted rows too;
        -- renumbering therefore goes through disjoint temporary ordinals.
        CREATE TABLE IF NOT EXISTS ordered_item (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          parent_id TEXT NOT NULL,
          ordinal INTEGER NOT NULL CHECK(ordinal >= 1),
          payload TEXT NOT NULL,
          created_at_ms INTEGER NOT NULL,
          updated_at_ms INTEGER NOT NULL,
          deleted_at_ms INTEGER
        );

        CREATE UNIQUE INDEX IF NOT EXISTS ux_ordered_item_parent_ordinal
          ON ordered_item(parent_id, ordinal);
"#;
