//! Skills use-case service.
//!
//! # Invariants
//! - A skill needs a non-blank name; every other field is optional.
//! - Category labels written by this service always come from `SkillCategory`.

use crate::model::record::RecordId;
use crate::model::skill::{
    group_by_category, in_category, Skill, SkillCategory, SkillGroup, FIELD_NAME,
};
use crate::model::validation::RequiredFields;
use crate::service::collection::{CollectionManager, CollectionResult, DeleteOutcome};
use crate::store::CollectionStore;

const REQUIRED: &[&str] = &[FIELD_NAME];

/// Typed facade over the skills collection.
pub struct SkillService<S: CollectionStore> {
    manager: CollectionManager<S>,
}

impl<S: CollectionStore> SkillService<S> {
    pub fn new(store: S, collection: impl Into<String>) -> Self {
        Self {
            manager: CollectionManager::new(store, collection, RequiredFields::new(REQUIRED)),
        }
    }

    /// Underlying manager, for form sessions.
    pub fn manager(&self) -> &CollectionManager<S> {
        &self.manager
    }

    pub fn create(&self, skill: &Skill) -> CollectionResult<RecordId> {
        self.manager.create(&skill.to_fields())
    }

    /// Overwrites every skill field on `id`, as the edit form does.
    pub fn update(&self, id: &RecordId, skill: &Skill) -> CollectionResult<()> {
        self.manager.update(id, &skill.to_fields())
    }

    pub fn delete(&self, id: &RecordId) -> CollectionResult<DeleteOutcome> {
        self.manager.delete(id)
    }

    pub fn list(&self) -> CollectionResult<Vec<(RecordId, Skill)>> {
        Ok(self
            .manager
            .list()?
            .iter()
            .map(|record| (record.id.clone(), Skill::from_record(record)))
            .collect())
    }

    /// Public skills page projection.
    pub fn list_grouped(&self) -> CollectionResult<Vec<SkillGroup>> {
        Ok(group_by_category(&self.manager.list()?))
    }

    /// Admin list for one selected category.
    pub fn list_in_category(
        &self,
        category: SkillCategory,
    ) -> CollectionResult<Vec<(RecordId, Skill)>> {
        let records = self.manager.list()?;
        Ok(in_category(&records, category)
            .into_iter()
            .map(|record| (record.id.clone(), Skill::from_record(record)))
            .collect())
    }
}
