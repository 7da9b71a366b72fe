//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies are deserialised leniently (strings, integers and raw
//! timestamps) and then validated field by field so a single response can
//! list every offending field.

use actix_web::{HttpRequest, error::JsonPayloadError, error::QueryPayloadError, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::domain::{
    Error, FieldViolation, ListLimit, Strength, ValidationErrors, ViolationCode,
};

/// Parse a UUID, naming `field` in the violation.
pub(crate) fn parse_uuid(field: &str, value: &str) -> Result<Uuid, FieldViolation> {
    Uuid::parse_str(value.trim()).map_err(|_| {
        FieldViolation::new(
            field,
            ViolationCode::InvalidFormat,
            format!("{field} must be a valid UUID"),
        )
    })
}

/// Parse a path segment identifier into a UUID or a `400` error.
pub(crate) fn parse_path_id(field: &str, value: &str) -> Result<Uuid, Error> {
    parse_uuid(field, value).map_err(|violation| ValidationErrors::from(violation).into())
}

/// Parse an RFC 3339 timestamp.
pub(crate) fn parse_timestamp(field: &str, value: &str) -> Result<DateTime<Utc>, FieldViolation> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| {
            FieldViolation::new(
                field,
                ViolationCode::InvalidFormat,
                format!("{field} must be an RFC 3339 timestamp"),
            )
        })
}

/// Validate an optional `limit` query parameter, defaulting when absent.
pub(crate) fn parse_limit(value: Option<i64>) -> Result<ListLimit, Error> {
    value
        .map(ListLimit::try_from)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(|violation| ValidationErrors::from(violation).into())
}

impl ValidationErrors {
    /// Validate an optional UUID field.
    pub(crate) fn uuid(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        let raw = value.filter(|raw| !raw.trim().is_empty())?;
        self.record(parse_uuid(field, raw))
    }

    /// Validate a required UUID field.
    pub(crate) fn required_uuid(&mut self, field: &str, value: Option<&str>) -> Option<Uuid> {
        if value.is_none_or(|raw| raw.trim().is_empty()) {
            self.push(FieldViolation::new(
                field,
                ViolationCode::MissingField,
                format!("{field} is required"),
            ));
            return None;
        }
        self.uuid(field, value)
    }

    /// Validate an optional timestamp; blank input becomes `None`.
    pub(crate) fn timestamp(&mut self, field: &str, value: Option<&str>) -> Option<DateTime<Utc>> {
        let raw = value.filter(|raw| !raw.trim().is_empty())?;
        self.record(parse_timestamp(field, raw))
    }

    /// Validate an optional strength score.
    pub(crate) fn strength(&mut self, field: &str, value: Option<i64>) -> Option<Strength> {
        let raw = value?;
        self.record(Strength::parse_field(field, raw))
    }

    fn record<T>(&mut self, result: Result<T, FieldViolation>) -> Option<T> {
        result.map_err(|violation| self.push(violation)).ok()
    }
}

/// Deserialise a present field as `Some`, so `null` becomes `Some(None)`.
///
/// Combine with `#[serde(default)]` to tell an absent field (`None`) from an
/// explicit `null` (`Some(None)`).
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// JSON extractor configuration reporting malformed bodies with the shared
/// error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Query-string extractor configuration reporting malformed parameters with
/// the shared error envelope.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        Error::invalid_request(format!("invalid query string: {err}")).into()
    })
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parse_uuid_accepts_valid_input() {
        let id = parse_uuid("contactId", "3fa85f64-5717-4562-b3fc-2c963f66afa6");
        assert_eq!(
            id.map(|value| value.to_string()).as_deref(),
            Ok("3fa85f64-5717-4562-b3fc-2c963f66afa6")
        );
    }

    #[rstest]
    fn parse_uuid_names_the_field() {
        let violation = parse_uuid("contactId", "nope").expect_err("invalid uuid");
        assert_eq!(violation.field, "contactId");
        assert_eq!(violation.code, ViolationCode::InvalidFormat);
    }

    #[rstest]
    #[case("2024-05-01T10:00:00Z")]
    #[case("2024-05-01T12:00:00+02:00")]
    fn parse_timestamp_normalises_to_utc(#[case] raw: &str) {
        let parsed = parse_timestamp("followUpRequired", raw).expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[rstest]
    fn parse_limit_defaults_and_validates() {
        assert_eq!(parse_limit(None).map(ListLimit::get), Ok(50));
        assert_eq!(parse_limit(Some(10)).map(ListLimit::get), Ok(10));
        let error = parse_limit(Some(0)).expect_err("zero rejected");
        assert_eq!(error.code(), crate::domain::ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn strength_records_out_of_range_scores() {
        let mut errors = ValidationErrors::new();
        assert_eq!(errors.strength("strength", None), None);
        assert!(errors.is_empty());
        assert_eq!(errors.strength("strength", Some(9)), None);
        assert_eq!(errors.violations().len(), 1);
        assert_eq!(errors.strength("strength", Some(4)).map(Strength::get), Some(4));
    }

    #[rstest]
    fn required_uuid_distinguishes_missing_from_malformed() {
        let mut errors = ValidationErrors::new();
        errors.required_uuid("contactId", None);
        errors.required_uuid("toContactId", Some("xyz"));
        let codes: Vec<_> = errors.violations().iter().map(|v| v.code).collect();
        assert_eq!(
            codes,
            vec![ViolationCode::MissingField, ViolationCode::InvalidFormat]
        );
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_some")]
        notes: Option<Option<String>>,
    }

    #[rstest]
    #[case("{}", None)]
    #[case(r#"{"notes": null}"#, Some(None))]
    #[case(r#"{"notes": "hi"}"#, Some(Some("hi".to_owned())))]
    fn deserialize_some_separates_absent_and_null(
        #[case] json: &str,
        #[case] expected: Option<Option<String>>,
    ) {
        let patch: Patch = serde_json::from_str(json).expect("valid json");
        assert_eq!(patch.notes, expected);
    }
}
