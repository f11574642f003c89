//! Content core for the Kitty Code site.
//! Owns the record model, collection storage and admin form use-cases.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{load_config, CollectionNames, ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::contact::{ContactForm, ProjectType};
pub use model::record::{fields, FieldValue, Fields, Record, RecordId};
pub use model::skill::{Skill, SkillCategory, SkillGroup};
pub use model::team::TeamMember;
pub use model::validation::{FieldError, RequiredFields, ValidationErrors};
pub use service::collection::{
    CollectionError, CollectionManager, CollectionResult, DeleteOutcome, ErrorKind,
};
pub use service::contact::ContactService;
pub use service::session::{FormSession, PendingSubmit, SessionError, SessionState, SubmitOutcome};
pub use service::skills::SkillService;
pub use service::team::TeamService;
pub use store::{CollectionStore, MemoryStore, SqliteCollectionStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
