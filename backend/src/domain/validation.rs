//! Field-level validation shared by the entity drafts and patches.
//!
//! Validation collects every failing field instead of stopping at the first
//! one, so clients can highlight all invalid inputs at once. The collected
//! violations convert into an [`Error`] with code `invalid_request` and a
//! `details.fields` array.

use std::fmt;

use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::Error;

/// Maximum length accepted for short text fields such as names.
pub const SHORT_TEXT_MAX: usize = 100;
/// Maximum length accepted for long free-form text such as notes.
pub const LONG_TEXT_MAX: usize = 5000;

// Column widths from the schema migration. Text longer than its column must
// fail validation rather than the insert.

/// `contacts.email`, `company`, `title`, `location` and `interactions.subject`.
pub const WIDE_TEXT_MAX: usize = 255;
/// `contacts.phone`.
pub const PHONE_MAX: usize = 50;
/// `contacts.category`.
pub const CATEGORY_MAX: usize = 50;
/// `contacts.linkedin_url`.
pub const LINKEDIN_URL_MAX: usize = 500;
/// `interactions.type`.
pub const INTERACTION_TYPE_MAX: usize = 50;
/// `relationships.relationship_type`.
pub const RELATIONSHIP_TYPE_MAX: usize = 50;
/// `tags.name`.
pub const TAG_NAME_MAX: usize = 50;

/// Machine-readable reason attached to a [`FieldViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    /// A required field was absent or blank.
    MissingField,
    /// Text exceeded its maximum length.
    TooLong,
    /// A number fell outside its permitted range.
    OutOfRange,
    /// A value did not match the expected format.
    InvalidFormat,
    /// A value was not one of the accepted options.
    InvalidOption,
    /// A timestamp lies in the future where only past values make sense.
    InFuture,
    /// Two fields that must differ were equal.
    SelfReference,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldViolation {
    /// JSON field name as sent by the client (camelCase).
    pub field: String,
    /// Stable reason code.
    pub code: ViolationCode,
    /// Human-readable explanation.
    pub message: String,
}

impl FieldViolation {
    /// Build a violation for the named field.
    pub fn new(field: impl Into<String>, code: ViolationCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

/// Accumulated violations for one request payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    /// Start an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation.
    pub fn push(&mut self, violation: FieldViolation) {
        self.0.push(violation);
    }

    /// Whether no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded violations in insertion order.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    /// Return `value` when nothing was recorded, otherwise the collection.
    pub fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }

    /// Validate a required text field, recording a violation on failure.
    ///
    /// Returns the trimmed value when present and acceptable.
    pub fn required_text(
        &mut self,
        field: &str,
        value: Option<String>,
        max: usize,
    ) -> Option<String> {
        let trimmed = value
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty());
        let Some(text) = trimmed else {
            self.push(FieldViolation::new(
                field,
                ViolationCode::MissingField,
                format!("{field} is required"),
            ));
            return None;
        };
        self.bounded(field, text, max)
    }

    /// Validate an optional text field; blank input becomes `None`.
    pub fn optional_text(
        &mut self,
        field: &str,
        value: Option<String>,
        max: usize,
    ) -> Option<String> {
        let text = value
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())?;
        self.bounded(field, text, max)
    }

    fn bounded(&mut self, field: &str, text: String, max: usize) -> Option<String> {
        if text.chars().count() > max {
            self.push(FieldViolation::new(
                field,
                ViolationCode::TooLong,
                format!("{field} must be at most {max} characters"),
            ));
            return None;
        }
        Some(text)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.iter().map(|v| v.field.as_str()).collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<FieldViolation> for ValidationErrors {
    fn from(value: FieldViolation) -> Self {
        Self(vec![value])
    }
}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        let message = match value.0.as_slice() {
            [single] => single.message.clone(),
            _ => value.to_string(),
        };
        Error::invalid_request(message).with_details(json!({ "fields": value.0 }))
    }
}
