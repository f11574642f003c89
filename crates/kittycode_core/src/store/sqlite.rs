//! SQLite-backed document store.
//!
//! # Responsibility
//! - Persist collection records as JSON documents in the `documents` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Listing order is insertion order (`seq ASC`).
//! - Partial updates go through `json_patch`, so omitted fields are untouched.
//! - Read paths reject undecodable documents instead of masking them.

use crate::db::migrations::latest_version;
use crate::db::{DbError, DbResult};
use crate::model::record::{FieldValue, Fields, Record, RecordId};
use crate::store::{CollectionStore, StoreError, StoreResult};
use rusqlite::{params, Connection, Row};

/// Document store over a migrated SQLite connection.
pub struct SqliteCollectionStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCollectionStore<'conn> {
    /// Wraps a connection, verifying it is migrated to the current schema.
    ///
    /// Connections from `open_db`/`open_db_in_memory` always pass.
    pub fn try_new(conn: &'conn Connection) -> DbResult<Self> {
        let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let latest = latest_version();
        if version > latest {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: version,
                latest_supported: latest,
            });
        }
        if version < latest {
            return Err(DbError::SchemaNotMigrated {
                db_version: version,
                expected: latest,
            });
        }
        Ok(Self { conn })
    }
}

impl CollectionStore for SqliteCollectionStore<'_> {
    fn list(&self, collection: &str) -> StoreResult<Vec<Record>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, fields
             FROM documents
             WHERE collection = ?1
             ORDER BY seq ASC;",
        )?;
        let mut rows = stmt.query([collection])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(parse_document_row(collection, row)?);
        }
        Ok(records)
    }

    fn insert(&self, collection: &str, fields: &Fields) -> StoreResult<RecordId> {
        let id = RecordId::generate();
        self.conn.execute(
            "INSERT INTO documents (collection, id, fields) VALUES (?1, ?2, ?3);",
            params![collection, id.as_str(), encode_fields(fields)?],
        )?;
        Ok(id)
    }

    fn update(&self, collection: &str, id: &RecordId, fields: &Fields) -> StoreResult<()> {
        let changed = self.conn.execute(
            "UPDATE documents
             SET
                fields = json_patch(fields, ?1),
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE collection = ?2 AND id = ?3;",
            params![encode_fields(fields)?, collection, id.as_str()],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.clone(),
            });
        }
        Ok(())
    }

    fn delete(&self, collection: &str, id: &RecordId) -> StoreResult<bool> {
        let changed = self.conn.execute(
            "DELETE FROM documents WHERE collection = ?1 AND id = ?2;",
            params![collection, id.as_str()],
        )?;
        Ok(changed > 0)
    }
}

fn encode_fields(fields: &Fields) -> StoreResult<String> {
    // JSON has no NaN/infinity; serde_json would write `null` and the row
    // would no longer decode.
    if let Some((name, _)) = fields
        .iter()
        .find(|(_, value)| matches!(value, FieldValue::Number(n) if !n.is_finite()))
    {
        return Err(StoreError::InvalidData(format!(
            "field `{name}` is not a finite number"
        )));
    }
    serde_json::to_string(fields)
        .map_err(|err| StoreError::InvalidData(format!("cannot encode fields: {err}")))
}

fn parse_document_row(collection: &str, row: &Row<'_>) -> StoreResult<Record> {
    let id: String = row.get("id")?;
    let raw: String = row.get("fields")?;
    let fields: Fields = serde_json::from_str(&raw).map_err(|err| {
        StoreError::InvalidData(format!(
            "document `{id}` in `{collection}` has undecodable fields: {err}"
        ))
    })?;
    Ok(Record::new(RecordId::new(id), fields))
}

#[cfg(test)]
mod tests {
    use super::SqliteCollectionStore;
    use crate::db::open_db_in_memory;
    use crate::model::record::{fields, FieldValue, RecordId};
    use crate::store::{CollectionStore, StoreError};

    #[test]
    fn update_merges_into_existing_document() {
        let conn = open_db_in_memory().expect("open in-memory db");
        let store = SqliteCollectionStore::try_new(&conn).expect("store over migrated db");

        let id = store
            .insert(
                "skills",
                &fields([
                    ("name", FieldValue::from("Rust")),
                    ("level", FieldValue::Integer(60)),
                ]),
            )
            .expect("insert skill");
        store
            .update("skills", &id, &fields([("level", FieldValue::Integer(90))]))
            .expect("merge level");

        let records = store.list("skills").expect("list skills");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text("name"), Some("Rust"));
        assert_eq!(records[0].integer("level"), Some(90));
    }

    #[test]
    fn update_in_other_collection_is_not_found() {
        let conn = open_db_in_memory().expect("open in-memory db");
        let store = SqliteCollectionStore::try_new(&conn).expect("store over migrated db");
        let id = store.insert("skills", &fields([("name", "Rust")])).expect("insert record");

        let err = store
            .update("team_members", &id, &fields([("name", "x")]))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn corrupted_document_is_reported_as_invalid_data() {
        let conn = open_db_in_memory().expect("open in-memory db");
        conn.execute(
            "INSERT INTO documents (collection, id, fields) VALUES ('skills', 'bad', '[1,2]');",
            [],
        )
        .expect("seed corrupted document");
        let store = SqliteCollectionStore::try_new(&conn).expect("store over migrated db");

        let err = store.list("skills").unwrap_err();
        assert!(matches!(err, StoreError::InvalidData(_)));
    }

    #[test]
    fn fractional_numbers_are_listed() {
        let conn = open_db_in_memory().expect("open in-memory db");
        conn.execute(
            "INSERT INTO documents (collection, id, fields)
             VALUES ('skills', 'frac', '{\"name\":\"Go\",\"level\":80.5}');",
            [],
        )
        .expect("seed fractional document");
        let store = SqliteCollectionStore::try_new(&conn).expect("store over migrated db");

        let records = store.list("skills").expect("fractional document should decode");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("level"), Some(&FieldValue::Number(80.5)));
    }

    #[test]
    fn non_finite_numbers_are_rejected_before_writing() {
        let conn = open_db_in_memory().expect("open in-memory db");
        let store = SqliteCollectionStore::try_new(&conn).expect("store over migrated db");

        let err = store
            .insert("skills", &fields([("level", FieldValue::Number(f64::NAN))]))
            .expect_err("NaN must not be persisted");
        assert!(matches!(err, StoreError::InvalidData(_)));
        assert!(store.list("skills").expect("list skills").is_empty());
    }

    #[test]
    fn delete_reports_absent_ids() {
        let conn = open_db_in_memory().expect("open in-memory db");
        let store = SqliteCollectionStore::try_new(&conn).expect("store over migrated db");
        assert!(!store.delete("skills", &RecordId::new("nope")).expect("delete record"));
    }
}
