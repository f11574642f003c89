//! Contact message submission.
//!
//! # Invariants
//! - The messages collection is write-only from this service.
//! - An invalid form performs zero store calls.

use crate::model::contact::{
    ContactForm, FIELD_EMAIL, FIELD_MESSAGE, FIELD_NAME, FIELD_PROJECT_TYPE,
};
use crate::model::record::RecordId;
use crate::model::validation::RequiredFields;
use crate::service::collection::{CollectionError, CollectionManager, CollectionResult};
use crate::store::CollectionStore;
use log::warn;
use std::time::{SystemTime, UNIX_EPOCH};

/// Write-only facade over the contact messages collection.
pub struct ContactService<S: CollectionStore> {
    manager: CollectionManager<S>,
}

impl<S: CollectionStore> ContactService<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        let required =
            RequiredFields::new(&[FIELD_NAME, FIELD_EMAIL, FIELD_PROJECT_TYPE, FIELD_MESSAGE]);
        Self {
            manager: CollectionManager::new(store, collection, required),
        }
    }

    /// Validates and stores `form`, stamped with the current time.
    pub fn submit(&self, form: &ContactForm) -> CollectionResult<RecordId> {
        self.submit_at(form, now_epoch_ms())
    }

    /// Validates and stores `form` with an explicit submission timestamp.
    pub fn submit_at(&self, form: &ContactForm, created_at_ms: i64) -> CollectionResult<RecordId> {
        if let Err(errors) = form.validate() {
            warn!(
                "event=contact_submit module=contact status=rejected collection={} error_code=validation fields={}",
                self.manager.collection(),
                errors.field_names()
            );
            return Err(CollectionError::Validation(errors));
        }
        self.manager.create(&form.to_fields(created_at_ms))
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}
