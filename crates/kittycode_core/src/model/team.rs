//! Team member records.

use crate::model::record::{FieldValue, Fields, Record};

pub const FIELD_NAME: &str = "name";
pub const FIELD_ROLE: &str = "role";
pub const FIELD_BIO: &str = "bio";
pub const FIELD_IMAGE: &str = "image";

/// Typed projection of a team-members record. All fields are free-form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
    /// Image reference (URL or asset path); empty when unset.
    pub image: String,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            ..Self::default()
        }
    }

    pub fn to_fields(&self) -> Fields {
        [
            (FIELD_NAME, self.name.as_str()),
            (FIELD_ROLE, self.role.as_str()),
            (FIELD_BIO, self.bio.as_str()),
            (FIELD_IMAGE, self.image.as_str()),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), FieldValue::from(value)))
        .collect()
    }

    pub fn from_record(record: &Record) -> Self {
        let text = |name: &str| record.text(name).unwrap_or_default().to_string();
        Self {
            name: text(FIELD_NAME),
            role: text(FIELD_ROLE),
            bio: text(FIELD_BIO),
            image: text(FIELD_IMAGE),
        }
    }
}
