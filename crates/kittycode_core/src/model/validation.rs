//! Field-level validation primitives.
//!
//! # Invariants
//! - A `ValidationErrors` value is never empty.
//! - At most one `FieldError` is reported per field.

use crate::model::record::Fields;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One failing field with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Non-empty set of field errors, in the order fields were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Returns `Ok(())` for an empty list, otherwise the collected errors.
    pub fn check(errors: Vec<FieldError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError::new(field, message)],
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for `field`, if that field failed.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    /// Names of failing fields, comma separated. Safe to log.
    pub fn field_names(&self) -> String {
        self.errors
            .iter()
            .map(|error| error.field.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "validation failed: {joined}")
    }
}

impl Error for ValidationErrors {}

/// Call-site policy naming fields that must be present and non-blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredFields {
    names: Vec<&'static str>,
}

impl RequiredFields {
    pub fn new(names: &[&'static str]) -> Self {
        Self {
            names: names.to_vec(),
        }
    }

    /// Policy with no required fields.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn names(&self) -> &[&'static str] {
        &self.names
    }

    /// Full-document check used on create: every required field must exist.
    pub fn validate_new(&self, fields: &Fields) -> Result<(), ValidationErrors> {
        let errors = self
            .names
            .iter()
            .filter(|name| fields.get(**name).map_or(true, |value| value.is_blank()))
            .map(|name| FieldError::new(*name, "is required"))
            .collect();
        ValidationErrors::check(errors)
    }

    /// Partial check used on update: only supplied required fields are
    /// inspected, omitted ones keep their stored value.
    pub fn validate_patch(&self, fields: &Fields) -> Result<(), ValidationErrors> {
        let errors = self
            .names
            .iter()
            .filter(|name| fields.get(**name).is_some_and(|value| value.is_blank()))
            .map(|name| FieldError::new(*name, "cannot be blank"))
            .collect();
        ValidationErrors::check(errors)
    }
}
