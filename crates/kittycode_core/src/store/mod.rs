//! Storage capability over named document collections.
//!
//! # Responsibility
//! - Define the `CollectionStore` contract the collection manager is built on.
//! - Provide an in-process store and a SQLite-backed document store.
//!
//! # Invariants
//! - Stores assign record ids; callers never choose them.
//! - `update` is a partial merge and reports `NotFound` for unknown ids.
//! - `delete` reports whether something was removed instead of failing on
//!   unknown ids.

use crate::db::DbError;
use crate::model::record::{Fields, Record, RecordId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteCollectionStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation name, used in permission errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOperation {
    List,
    Insert,
    Update,
    Delete,
}

impl StoreOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Backend failure surfaced by a `CollectionStore`.
#[derive(Debug)]
pub enum StoreError {
    NotFound {
        collection: String,
        id: RecordId,
    },
    PermissionDenied {
        collection: String,
        operation: StoreOperation,
    },
    /// Backend could not be reached.
    Unavailable(String),
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { collection, id } => {
                write!(f, "record `{id}` not found in `{collection}`")
            }
            Self::PermissionDenied {
                collection,
                operation,
            } => write!(
                f,
                "permission denied for {} on `{collection}`",
                operation.as_str()
            ),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid stored document: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Client capability for one document backend.
///
/// Injected into `CollectionManager`; tests substitute `MemoryStore`.
pub trait CollectionStore {
    /// Returns every record in `collection`, in backend iteration order.
    fn list(&self, collection: &str) -> StoreResult<Vec<Record>>;
    /// Inserts a new record and returns its generated id.
    fn insert(&self, collection: &str, fields: &Fields) -> StoreResult<RecordId>;
    /// Merges `fields` into an existing record.
    fn update(&self, collection: &str, id: &RecordId, fields: &Fields) -> StoreResult<()>;
    /// Removes a record. Returns `false` when `id` was already absent.
    fn delete(&self, collection: &str, id: &RecordId) -> StoreResult<bool>;
}

impl<T: CollectionStore + ?Sized> CollectionStore for &T {
    fn list(&self, collection: &str) -> StoreResult<Vec<Record>> {
        (**self).list(collection)
    }

    fn insert(&self, collection: &str, fields: &Fields) -> StoreResult<RecordId> {
        (**self).insert(collection, fields)
    }

    fn update(&self, collection: &str, id: &RecordId, fields: &Fields) -> StoreResult<()> {
        (**self).update(collection, id, fields)
    }

    fn delete(&self, collection: &str, id: &RecordId) -> StoreResult<bool> {
        (**self).delete(collection, id)
    }
}
