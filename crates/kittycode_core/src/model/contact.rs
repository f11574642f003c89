//! Contact form input and its validation rules.
//!
//! # Invariants
//! - Validation reports every failing field in one pass, in form order.
//! - Only validated forms are converted to `Fields`.

use crate::model::record::{FieldValue, Fields};
use crate::model::validation::{FieldError, ValidationErrors};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const FIELD_NAME: &str = "name";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PROJECT_TYPE: &str = "projectType";
pub const FIELD_MESSAGE: &str = "message";
pub const FIELD_CREATED_AT: &str = "createdAt";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

/// Kind of project a visitor is asking about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Web,
    App,
    Design,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [Self::Web, Self::App, Self::Design, Self::Other];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Web => "web",
            Self::App => "app",
            Self::Design => "design",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
    }
}

/// Raw contact form state as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub project_type: Option<ProjectType>,
    pub message: String,
}

impl ContactForm {
    /// Checks all fields; never short-circuits on the first failure.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::new(FIELD_NAME, "name is required"));
        }
        if !is_valid_email(&self.email) {
            errors.push(FieldError::new(FIELD_EMAIL, "email address is not valid"));
        }
        if self.project_type.is_none() {
            errors.push(FieldError::new(FIELD_PROJECT_TYPE, "select a project type"));
        }
        if self.message.trim().is_empty() {
            errors.push(FieldError::new(FIELD_MESSAGE, "message is required"));
        }
        ValidationErrors::check(errors)
    }

    /// Document written to the messages collection.
    pub fn to_fields(&self, created_at_ms: i64) -> Fields {
        let mut fields = Fields::new();
        fields.insert(FIELD_NAME.to_string(), FieldValue::from(self.name.as_str()));
        fields.insert(FIELD_EMAIL.to_string(), FieldValue::from(self.email.as_str()));
        if let Some(kind) = self.project_type {
            fields.insert(
                FIELD_PROJECT_TYPE.to_string(),
                FieldValue::from(kind.as_str()),
            );
        }
        fields.insert(
            FIELD_MESSAGE.to_string(),
            FieldValue::from(self.message.as_str()),
        );
        fields.insert(
            FIELD_CREATED_AT.to_string(),
            FieldValue::Integer(created_at_ms),
        );
        fields
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, ContactForm, ProjectType};

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            project_type: Some(ProjectType::Web),
            message: "Hello".to_string(),
        }
    }

    #[test]
    fn email_pattern_matches_expected_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn valid_form_passes() {
        assert!(valid_form().validate().is_ok());
    }

    #[test]
    fn every_failing_field_is_reported_once() {
        let err = ContactForm::default().validate().unwrap_err();
        assert_eq!(err.field_names(), "name,email,projectType,message");
    }

    #[test]
    fn project_type_parses_case_insensitively() {
        assert_eq!(ProjectType::parse(" Design "), Some(ProjectType::Design));
        assert_eq!(ProjectType::parse(""), None);
    }

    #[test]
    fn to_fields_stamps_created_at() {
        let fields = valid_form().to_fields(1_700_000_000_000);
        assert_eq!(
            fields.get("createdAt").and_then(|value| value.as_integer()),
            Some(1_700_000_000_000)
        );
        assert_eq!(
            fields.get("projectType").and_then(|value| value.as_text()),
            Some("web")
        );
    }
}
