//! Remote collection manager.
//!
//! # Responsibility
//! - Map one named collection onto list/create/update/delete use-cases.
//! - Enforce the call-site required-field policy before any store call.
//! - Translate store failures into a small typed error taxonomy.
//!
//! # Invariants
//! - Validation failures never reach the store.
//! - The manager holds no cache; callers re-list after every mutation.
//! - Nothing is retried; every store failure surfaces to the caller.
//! - Deleting an absent id is `DeleteOutcome::AlreadyAbsent`, not an error.

use crate::model::record::{Fields, Record, RecordId};
use crate::model::validation::{RequiredFields, ValidationErrors};
use crate::store::{CollectionStore, StoreError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type CollectionResult<T> = Result<T, CollectionError>;

/// Coarse failure class for differentiated UI handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Transport,
    Permission,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::NotFound => "not_found",
            Self::Transport => "transport",
            Self::Permission => "permission",
        }
    }
}

/// Error returned by collection manager operations.
#[derive(Debug)]
pub enum CollectionError {
    /// Input rejected locally; no store call was made.
    Validation(ValidationErrors),
    NotFound(RecordId),
    /// Caller lacks rights for the operation on this collection.
    Permission(StoreError),
    /// Backend unreachable or returned data that could not be read.
    Transport(StoreError),
}

impl CollectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Permission(_) => ErrorKind::Permission,
            Self::Transport(_) => ErrorKind::Transport,
        }
    }

    /// Field errors when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

impl Display for CollectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::Permission(err) | Self::Transport(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CollectionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Permission(err) | Self::Transport(err) => Some(err),
        }
    }
}

impl From<ValidationErrors> for CollectionError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CollectionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound { id, .. } => Self::NotFound(id),
            err @ StoreError::PermissionDenied { .. } => Self::Permission(err),
            other => Self::Transport(other),
        }
    }
}

/// Result of a delete call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Removed,
    /// The id did not exist (never created, or deleted earlier).
    AlreadyAbsent,
}

/// CRUD facade over one named collection of a `CollectionStore`.
pub struct CollectionManager<S: CollectionStore> {
    store: S,
    collection: String,
    required: RequiredFields,
}

impl<S: CollectionStore> CollectionManager<S> {
    pub fn new(store: S, collection: impl Into<String>, required: RequiredFields) -> Self {
        Self {
            store,
            collection: collection.into(),
            required,
        }
    }

    pub fn collection(&self) -> &str {
        self.collection.as_str()
    }

    pub fn required(&self) -> &RequiredFields {
        &self.required
    }

    /// Fetches a full snapshot of the collection.
    pub fn list(&self) -> CollectionResult<Vec<Record>> {
        let started_at = Instant::now();
        match self.store.list(&self.collection) {
            Ok(records) => {
                info!(
                    "event=collection_list module=collection status=ok collection={} count={} duration_ms={}",
                    self.collection,
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(records)
            }
            Err(err) => Err(self.fail("collection_list", started_at, err)),
        }
    }

    /// Validates `fields` against the required policy, then inserts.
    pub fn create(&self, fields: &Fields) -> CollectionResult<RecordId> {
        if let Err(errors) = self.required.validate_new(fields) {
            return Err(self.reject("collection_create", errors));
        }

        let started_at = Instant::now();
        match self.store.insert(&self.collection, fields) {
            Ok(id) => {
                info!(
                    "event=collection_create module=collection status=ok collection={} id={} duration_ms={}",
                    self.collection,
                    id,
                    started_at.elapsed().as_millis()
                );
                Ok(id)
            }
            Err(err) => Err(self.fail("collection_create", started_at, err)),
        }
    }

    /// Partially updates `id`: supplied fields replace, the rest stay.
    pub fn update(&self, id: &RecordId, fields: &Fields) -> CollectionResult<()> {
        if let Err(errors) = self.required.validate_patch(fields) {
            return Err(self.reject("collection_update", errors));
        }

        let started_at = Instant::now();
        match self.store.update(&self.collection, id, fields) {
            Ok(()) => {
                info!(
                    "event=collection_update module=collection status=ok collection={} id={} field_count={} duration_ms={}",
                    self.collection,
                    id,
                    fields.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => Err(self.fail("collection_update", started_at, err)),
        }
    }

    /// Removes `id`. An absent id yields `DeleteOutcome::AlreadyAbsent`.
    pub fn delete(&self, id: &RecordId) -> CollectionResult<DeleteOutcome> {
        let started_at = Instant::now();
        match self.store.delete(&self.collection, id) {
            Ok(true) => {
                info!(
                    "event=collection_delete module=collection status=ok collection={} id={} duration_ms={}",
                    self.collection,
                    id,
                    started_at.elapsed().as_millis()
                );
                Ok(DeleteOutcome::Removed)
            }
            Ok(false) => {
                warn!(
                    "event=collection_delete module=collection status=absent collection={} id={} duration_ms={}",
                    self.collection,
                    id,
                    started_at.elapsed().as_millis()
                );
                Ok(DeleteOutcome::AlreadyAbsent)
            }
            Err(err) => Err(self.fail("collection_delete", started_at, err)),
        }
    }

    fn reject(&self, event: &str, errors: ValidationErrors) -> CollectionError {
        warn!(
            "event={event} module=collection status=rejected collection={} error_code=validation fields={}",
            self.collection,
            errors.field_names()
        );
        CollectionError::Validation(errors)
    }

    fn fail(&self, event: &str, started_at: Instant, err: StoreError) -> CollectionError {
        let err = CollectionError::from(err);
        error!(
            "event={event} module=collection status=error collection={} duration_ms={} error_code={} error={}",
            self.collection,
            started_at.elapsed().as_millis(),
            err.kind().as_str(),
            err
        );
        err
    }
}
