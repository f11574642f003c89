//! Skill records and category grouping.
//!
//! # Responsibility
//! - Own the single closed definition of skill categories.
//! - Convert between `Skill` and stored `Fields`.
//! - Build the grouped and filtered projections used by display and admin views.
//!
//! # Invariants
//! - Persisted `level` is always within `0..=100`.
//! - Records with a missing or blank category never appear in grouped views
//!   but are still returned by raw listing. Any other label, known or not,
//!   gets its own group.

use crate::model::record::{FieldValue, Fields, Record, RecordId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_CATEGORY: &str = "category";

pub const MAX_LEVEL: u8 = 100;

/// Fixed skill grouping labels.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SkillCategory {
    #[default]
    Frontend,
    Backend,
    SoftSkills,
}

impl SkillCategory {
    pub const ALL: [SkillCategory; 3] = [Self::Frontend, Self::Backend, Self::SoftSkills];

    /// Stored label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Frontend => "Frontend",
            Self::Backend => "Backend",
            Self::SoftSkills => "Soft Skills",
        }
    }

    /// Parses a stored label. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label() == trimmed)
    }
}

impl Display for SkillCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Typed projection of a skills-collection record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    pub description: String,
    pub level: u8,
    pub category: Option<SkillCategory>,
}

impl Skill {
    pub fn new(name: impl Into<String>, level: i64, category: SkillCategory) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            level: clamp_level(level),
            category: Some(category),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Full field set written on create and on edit-form submission.
    pub fn to_fields(&self) -> Fields {
        let mut fields = Fields::new();
        fields.insert(FIELD_NAME.to_string(), FieldValue::from(self.name.as_str()));
        fields.insert(
            FIELD_DESCRIPTION.to_string(),
            FieldValue::from(self.description.as_str()),
        );
        fields.insert(
            FIELD_LEVEL.to_string(),
            FieldValue::from(self.level.min(MAX_LEVEL)),
        );
        if let Some(category) = self.category {
            fields.insert(FIELD_CATEGORY.to_string(), FieldValue::from(category.label()));
        }
        fields
    }

    /// Reads a skill from a stored record, tolerating missing optional fields.
    ///
    /// `level` accepts numeric text (form inputs may persist it as a string)
    /// and is clamped into range.
    pub fn from_record(record: &Record) -> Self {
        let level = match record.get(FIELD_LEVEL) {
            Some(FieldValue::Integer(value)) => *value,
            Some(FieldValue::Number(value)) => value.round() as i64,
            Some(FieldValue::Text(value)) => value.trim().parse().unwrap_or(0),
            None => 0,
        };
        Self {
            name: record.text(FIELD_NAME).unwrap_or_default().to_string(),
            description: record
                .text(FIELD_DESCRIPTION)
                .unwrap_or_default()
                .to_string(),
            level: clamp_level(level),
            category: record.text(FIELD_CATEGORY).and_then(SkillCategory::parse),
        }
    }
}

/// Clamps a raw level input into `0..=100`.
pub fn clamp_level(level: i64) -> u8 {
    u8::try_from(level.clamp(0, i64::from(MAX_LEVEL))).unwrap_or(0)
}

/// One category bucket for the public skills page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillGroup {
    /// Trimmed stored label.
    pub label: String,
    /// `None` when the label is outside the fixed category set.
    pub category: Option<SkillCategory>,
    pub skills: Vec<(RecordId, Skill)>,
}

/// Groups records by trimmed category label in first-seen order.
///
/// Stored labels are not validated by the backend, so unknown labels form
/// their own groups; only missing or blank categories are skipped.
pub fn group_by_category(records: &[Record]) -> Vec<SkillGroup> {
    let mut groups: Vec<SkillGroup> = Vec::new();
    for record in records {
        let label = match record.text(FIELD_CATEGORY).map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => continue,
        };
        let skill = Skill::from_record(record);

        match groups.iter_mut().find(|group| group.label == label) {
            Some(group) => group.skills.push((record.id.clone(), skill)),
            None => groups.push(SkillGroup {
                label: label.to_string(),
                category: SkillCategory::parse(label),
                skills: vec![(record.id.clone(), skill)],
            }),
        }
    }
    groups
}

/// Records belonging to `category`, in listing order.
pub fn in_category(records: &[Record], category: SkillCategory) -> Vec<&Record> {
    records
        .iter()
        .filter(|record| {
            record
                .text(FIELD_CATEGORY)
                .and_then(SkillCategory::parse)
                == Some(category)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{clamp_level, group_by_category, in_category, Skill, SkillCategory};
    use crate::model::record::{fields, FieldValue, Record, RecordId};

    fn record(id: &str, name: &str, category: &str) -> Record {
        Record::new(
            RecordId::new(id),
            fields([
                ("name", FieldValue::from(name)),
                ("category", FieldValue::from(category)),
            ]),
        )
    }

    #[test]
    fn category_labels_round_trip() {
        for category in SkillCategory::ALL {
            assert_eq!(SkillCategory::parse(category.label()), Some(category));
        }
        assert_eq!(SkillCategory::parse(" Backend "), Some(SkillCategory::Backend));
        assert_eq!(SkillCategory::parse("Design"), None);
    }

    #[test]
    fn level_is_clamped() {
        assert_eq!(clamp_level(-5), 0);
        assert_eq!(clamp_level(80), 80);
        assert_eq!(clamp_level(250), 100);
    }

    #[test]
    fn from_record_accepts_numeric_text_level() {
        let record = Record::new(
            RecordId::new("x"),
            fields([("name", "Rust"), ("level", "75")]),
        );
        let skill = Skill::from_record(&record);
        assert_eq!(skill.level, 75);
        assert_eq!(skill.category, None);
    }

    #[test]
    fn grouping_skips_blank_category_and_keeps_first_seen_order() {
        let records = vec![
            record("1", "Node.js", "Backend"),
            record("2", "React", "Frontend"),
            record("3", "Orphan", "   "),
            record("4", "PostgreSQL", "Backend"),
            Record::new(RecordId::new("5"), fields([("name", "NoCategory")])),
        ];

        let groups = group_by_category(&records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, Some(SkillCategory::Backend));
        let backend_names: Vec<_> = groups[0]
            .skills
            .iter()
            .map(|(_, skill)| skill.name.as_str())
            .collect();
        assert_eq!(backend_names, vec!["Node.js", "PostgreSQL"]);
        assert_eq!(groups[1].category, Some(SkillCategory::Frontend));
    }

    #[test]
    fn grouping_keeps_unknown_labels_as_their_own_group() {
        let records = vec![
            record("1", "React", "Frontend"),
            record("2", "Docker", " DevOps "),
            record("3", "Terraform", "DevOps"),
        ];

        let groups = group_by_category(&records);
        let labels: Vec<_> = groups.iter().map(|group| group.label.as_str()).collect();
        assert_eq!(labels, vec!["Frontend", "DevOps"]);
        assert_eq!(groups[1].category, None);
        assert_eq!(groups[1].skills.len(), 2);
        assert_eq!(groups[1].skills[0].1.category, None);
    }

    #[test]
    fn to_fields_never_writes_out_of_range_level() {
        let mut skill = Skill::new("Rust", 80, SkillCategory::Backend);
        skill.level = 250;

        let fields = skill.to_fields();
        assert_eq!(fields["level"], FieldValue::Integer(100));
    }

    #[test]
    fn fractional_level_is_rounded() {
        let record = Record::new(
            RecordId::new("x"),
            fields([
                ("name", FieldValue::from("Rust")),
                ("level", FieldValue::Number(79.6)),
            ]),
        );
        assert_eq!(Skill::from_record(&record).level, 80);
    }

    #[test]
    fn in_category_filters_by_label() {
        let records = vec![
            record("1", "Teamwork", "Soft Skills"),
            record("2", "React", "Frontend"),
        ];
        let soft = in_category(&records, SkillCategory::SoftSkills);
        assert_eq!(soft.len(), 1);
        assert_eq!(soft[0].id.as_str(), "1");
    }
}
