//! Admin form session over one collection.
//!
//! # Responsibility
//! - Track the `Idle -> Editing -> Submitting -> Idle | Editing` lifecycle of
//!   one form instance.
//! - Hold the latest collection snapshot and re-fetch it after every
//!   successful mutation.
//!
//! # Invariants
//! - At most one mutation is outstanding per session: while `Submitting`,
//!   further submits, deletes, edits and cancels are rejected with `Busy`.
//! - A `PendingSubmit` is not `Clone` and is consumed by `finish_submit`,
//!   which only runs while the session is `Submitting`.
//! - On success the draft is cleared and the session returns to `Idle`.
//! - On failure the draft is kept and the session returns to `Editing`.
//! - The snapshot is only ever replaced wholesale by a fresh `list()`.

use crate::model::record::{FieldValue, Fields, Record, RecordId};
use crate::model::validation::ValidationErrors;
use crate::service::collection::{
    CollectionError, CollectionManager, CollectionResult, DeleteOutcome, ErrorKind,
};
use crate::store::CollectionStore;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing,
    Submitting,
}

/// Error returned by session transitions.
#[derive(Debug)]
pub enum SessionError {
    /// Operation needs an open form.
    NotEditing,
    /// A submission is already in flight.
    Busy,
    /// `finish_submit` called without a matching `begin_submit`.
    NoPendingSubmit,
    Collection(CollectionError),
}

impl SessionError {
    /// Failure class when the error came from the collection manager.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Collection(err) => Some(err.kind()),
            Self::NotEditing | Self::Busy | Self::NoPendingSubmit => None,
        }
    }
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotEditing => write!(f, "no form is open"),
            Self::Busy => write!(f, "a submission is already in progress"),
            Self::NoPendingSubmit => write!(f, "no submission is in progress"),
            Self::Collection(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Collection(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CollectionError> for SessionError {
    fn from(value: CollectionError) -> Self {
        Self::Collection(value)
    }
}

/// Write captured by `begin_submit`, to be completed by `finish_submit`.
#[derive(Debug, PartialEq)]
pub struct PendingSubmit {
    target: Option<RecordId>,
    fields: Fields,
}

impl PendingSubmit {
    /// `Some` when this write updates an existing record.
    pub fn target(&self) -> Option<&RecordId> {
        self.target.as_ref()
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(RecordId),
    Updated(RecordId),
}

/// UI-facing state for one admin form.
#[derive(Debug)]
pub struct FormSession {
    state: SessionState,
    target: Option<RecordId>,
    draft: Fields,
    field_errors: Option<ValidationErrors>,
    last_error: Option<ErrorKind>,
    snapshot: Vec<Record>,
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}

impl FormSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            target: None,
            draft: Fields::new(),
            field_errors: None,
            last_error: None,
            snapshot: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Record being edited, `None` for a new-record form.
    pub fn target(&self) -> Option<&RecordId> {
        self.target.as_ref()
    }

    pub fn draft(&self) -> &Fields {
        &self.draft
    }

    /// Field errors from the last rejected submission.
    pub fn field_errors(&self) -> Option<&ValidationErrors> {
        self.field_errors.as_ref()
    }

    /// Failure class of the last failed submission, if any.
    pub fn last_error(&self) -> Option<ErrorKind> {
        self.last_error
    }

    /// Last fetched collection contents.
    pub fn snapshot(&self) -> &[Record] {
        &self.snapshot
    }

    /// Opens an empty form for a new record.
    pub fn open_new(&mut self) -> Result<(), SessionError> {
        self.open(None, Fields::new())
    }

    /// Opens the form prefilled from `record`.
    pub fn open_edit(&mut self, record: &Record) -> Result<(), SessionError> {
        self.open(Some(record.id.clone()), record.fields.clone())
    }

    /// Sets one draft field and clears any error reported for it.
    pub fn set_field(
        &mut self,
        name: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Result<(), SessionError> {
        self.ensure_editing()?;
        let name = name.into();
        if let Some(errors) = self.field_errors.take() {
            let remaining = errors
                .errors()
                .iter()
                .filter(|error| error.field != name)
                .cloned()
                .collect();
            self.field_errors = ValidationErrors::check(remaining).err();
        }
        self.draft.insert(name, value.into());
        Ok(())
    }

    /// Closes the form and discards the draft.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        if self.state == SessionState::Submitting {
            return Err(SessionError::Busy);
        }
        self.reset_form();
        Ok(())
    }

    /// Moves `Editing -> Submitting` and captures the write to perform.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, SessionError> {
        self.ensure_editing()?;
        self.state = SessionState::Submitting;
        Ok(PendingSubmit {
            target: self.target.clone(),
            fields: self.draft.clone(),
        })
    }

    /// Performs `pending`, then re-fetches the snapshot on success.
    ///
    /// A failed write returns the session to `Editing` with the draft kept.
    /// When the write succeeds but the re-fetch fails, the form is still
    /// cleared and the re-fetch error is returned; the snapshot is stale.
    pub fn finish_submit<S: CollectionStore>(
        &mut self,
        manager: &CollectionManager<S>,
        pending: PendingSubmit,
    ) -> Result<SubmitOutcome, SessionError> {
        if self.state != SessionState::Submitting {
            return Err(SessionError::NoPendingSubmit);
        }
        let written = match pending.target {
            Some(id) => manager
                .update(&id, &pending.fields)
                .map(|()| SubmitOutcome::Updated(id)),
            None => manager.create(&pending.fields).map(SubmitOutcome::Created),
        };

        let outcome = match written {
            Ok(outcome) => outcome,
            Err(err) => {
                self.state = SessionState::Editing;
                self.last_error = Some(err.kind());
                self.field_errors = err.validation_errors().cloned();
                return Err(err.into());
            }
        };

        self.reset_form();
        self.refresh(manager)?;
        Ok(outcome)
    }

    /// `begin_submit` followed by `finish_submit`.
    pub fn submit<S: CollectionStore>(
        &mut self,
        manager: &CollectionManager<S>,
    ) -> Result<SubmitOutcome, SessionError> {
        let pending = self.begin_submit()?;
        self.finish_submit(manager, pending)
    }

    /// Deletes `id` and re-fetches the snapshot.
    pub fn delete<S: CollectionStore>(
        &mut self,
        manager: &CollectionManager<S>,
        id: &RecordId,
    ) -> Result<DeleteOutcome, SessionError> {
        if self.state == SessionState::Submitting {
            return Err(SessionError::Busy);
        }
        let outcome = manager.delete(id)?;
        if self.target.as_ref() == Some(id) {
            self.reset_form();
        }
        self.refresh(manager)?;
        Ok(outcome)
    }

    /// Replaces the snapshot with a fresh listing.
    pub fn refresh<S: CollectionStore>(
        &mut self,
        manager: &CollectionManager<S>,
    ) -> CollectionResult<&[Record]> {
        self.snapshot = manager.list()?;
        Ok(&self.snapshot)
    }

    fn open(&mut self, target: Option<RecordId>, draft: Fields) -> Result<(), SessionError> {
        if self.state == SessionState::Submitting {
            return Err(SessionError::Busy);
        }
        self.state = SessionState::Editing;
        self.target = target;
        self.draft = draft;
        self.field_errors = None;
        self.last_error = None;
        Ok(())
    }

    fn ensure_editing(&self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Editing => Ok(()),
            SessionState::Submitting => Err(SessionError::Busy),
            SessionState::Idle => Err(SessionError::NotEditing),
        }
    }

    fn reset_form(&mut self) {
        self.state = SessionState::Idle;
        self.target = None;
        self.draft.clear();
        self.field_errors = None;
        self.last_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::{FormSession, SessionError, SessionState};
    use crate::model::validation::RequiredFields;
    use crate::service::collection::CollectionManager;
    use crate::store::memory::MemoryStore;

    #[test]
    fn set_field_requires_open_form() {
        let mut session = FormSession::new();
        let err = session
            .set_field("name", "Rust")
            .expect_err("idle session has no draft");
        assert!(matches!(err, SessionError::NotEditing));
    }

    #[test]
    fn second_begin_submit_is_busy() {
        let mut session = FormSession::new();
        session.open_new().expect("open form");
        session.set_field("name", "Rust").expect("set name");

        let pending = session.begin_submit().expect("begin submit");
        assert_eq!(pending.fields().len(), 1);
        assert_eq!(session.state(), SessionState::Submitting);

        assert!(matches!(session.begin_submit(), Err(SessionError::Busy)));
        assert!(matches!(session.cancel(), Err(SessionError::Busy)));
        assert!(matches!(session.open_new(), Err(SessionError::Busy)));
    }

    #[test]
    fn finish_submit_requires_submitting_state() {
        let store = MemoryStore::new();
        let manager = CollectionManager::new(&store, "skills", RequiredFields::new(&["name"]));
        let mut other = FormSession::new();
        other.open_new().expect("open form");
        other.set_field("name", "Rust").expect("set name");
        let pending = other.begin_submit().expect("begin submit");

        let mut idle = FormSession::new();
        let err = idle
            .finish_submit(&manager, pending)
            .expect_err("idle session has nothing to finish");

        assert!(matches!(err, SessionError::NoPendingSubmit));
        assert_eq!(idle.state(), SessionState::Idle);
        assert_eq!(store.call_count(), 0);
    }

    #[test]
    fn cancel_discards_draft() {
        let mut session = FormSession::new();
        session.open_new().expect("open form");
        session.set_field("name", "Rust").expect("set name");
        session.cancel().expect("cancel editing form");

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.draft().is_empty());
    }
}
