//! Team members use-case service.

use crate::model::record::{Fields, RecordId};
use crate::model::team::{TeamMember, FIELD_NAME};
use crate::model::validation::RequiredFields;
use crate::service::collection::{CollectionManager, CollectionResult, DeleteOutcome};
use crate::store::CollectionStore;

/// Typed facade over the team members collection.
pub struct TeamService<S: CollectionStore> {
    manager: CollectionManager<S>,
}

impl<S: CollectionStore> TeamService<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            manager: CollectionManager::new(store, collection, RequiredFields::new(&[FIELD_NAME])),
        }
    }

    pub fn manager(&self) -> &CollectionManager<S> {
        &self.manager
    }

    pub fn create(&self, member: &TeamMember) -> CollectionResult<RecordId> {
        self.manager.create(&member.to_fields())
    }

    /// Looks a member up in a fresh listing.
    pub fn get(&self, id: &RecordId) -> CollectionResult<Option<TeamMember>> {
        Ok(self
            .manager
            .list()?
            .iter()
            .find(|record| &record.id == id)
            .map(TeamMember::from_record))
    }

    pub fn list(&self) -> CollectionResult<Vec<(RecordId, TeamMember)>> {
        Ok(self
            .manager
            .list()?
            .iter()
            .map(|record| (record.id.clone(), TeamMember::from_record(record)))
            .collect())
    }

    /// Partial update; only `fields` are written.
    pub fn update(&self, id: &RecordId, fields: &Fields) -> CollectionResult<()> {
        self.manager.update(id, fields)
    }

    pub fn delete(&self, id: &RecordId) -> CollectionResult<DeleteOutcome> {
        self.manager.delete(id)
    }
}
