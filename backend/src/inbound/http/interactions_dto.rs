//! Interaction request DTOs and their validation.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::validation::{INTERACTION_TYPE_MAX, LONG_TEXT_MAX, WIDE_TEXT_MAX};
use crate::domain::{
    FieldViolation, InteractionDraft, InteractionOutcome, InteractionPatch, ValidationErrors,
    ViolationCode,
};
use crate::inbound::http::validation::deserialize_some;

/// Query string for `GET /api/interactions`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListInteractionsParams {
    /// Restrict the list to one contact (UUID).
    pub contact_id: Option<String>,
    /// Page size in `1..=200`; defaults to 50.
    pub limit: Option<i64>,
}

/// Request payload for `POST /api/interactions`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInteractionRequest {
    /// Contact the interaction concerns (UUID).
    pub contact_id: Option<String>,
    /// Channel such as `meeting`, `call` or `email`.
    #[serde(rename = "type")]
    #[schema(example = "meeting")]
    pub kind: Option<String>,
    pub subject: Option<String>,
    pub notes: Option<String>,
    /// `positive`, `neutral` or `negative`.
    pub outcome: Option<String>,
    /// RFC 3339 timestamp for a follow-up.
    pub follow_up_required: Option<String>,
    /// RFC 3339 timestamp of an earlier engagement; defaults to now.
    pub created_at: Option<String>,
}

fn parse_outcome(
    errors: &mut ValidationErrors,
    value: Option<String>,
) -> Option<InteractionOutcome> {
    let raw = value.map(|raw| raw.trim().to_ascii_lowercase()).filter(|raw| !raw.is_empty())?;
    match raw.parse() {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            errors.push(FieldViolation::new(
                "outcome",
                ViolationCode::InvalidOption,
                err.to_string(),
            ));
            None
        }
    }
}

impl TryFrom<CreateInteractionRequest> for InteractionDraft {
    type Error = ValidationErrors;

    fn try_from(value: CreateInteractionRequest) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let contact_id = errors.required_uuid("contactId", value.contact_id.as_deref());
        let kind = errors.required_text("type", value.kind, INTERACTION_TYPE_MAX);
        let subject = errors.optional_text("subject", value.subject, WIDE_TEXT_MAX);
        let notes = errors.optional_text("notes", value.notes, LONG_TEXT_MAX);
        let outcome = parse_outcome(&mut errors, value.outcome);
        let follow_up_required =
            errors.timestamp("followUpRequired", value.follow_up_required.as_deref());
        let occurred_at = errors.timestamp("createdAt", value.created_at.as_deref());

        errors.finish(Self {
            contact_id: contact_id.unwrap_or_default(),
            kind: kind.unwrap_or_default(),
            subject,
            notes,
            outcome,
            follow_up_required,
            occurred_at,
        })
    }
}

/// Request payload for `PUT /api/interactions/{id}`.
///
/// Omitted fields are left unchanged. `null` clears an optional field. The
/// contact and creation time cannot be changed.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInteractionRequest {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub subject: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub outcome: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub follow_up_required: Option<Option<String>>,
}

impl TryFrom<UpdateInteractionRequest> for InteractionPatch {
    type Error = ValidationErrors;

    fn try_from(value: UpdateInteractionRequest) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let kind = value
            .kind
            .and_then(|raw| errors.required_text("type", Some(raw), INTERACTION_TYPE_MAX));
        let subject = value
            .subject
            .map(|inner| errors.optional_text("subject", inner, WIDE_TEXT_MAX));
        let notes = value
            .notes
            .map(|inner| errors.optional_text("notes", inner, LONG_TEXT_MAX));
        let outcome = value.outcome.map(|inner| parse_outcome(&mut errors, inner));
        let follow_up_required = value
            .follow_up_required
            .map(|inner| errors.timestamp("followUpRequired", inner.as_deref()));

        errors.finish(Self {
            kind,
            subject,
            notes,
            outcome,
            follow_up_required,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn valid_request() -> CreateInteractionRequest {
        CreateInteractionRequest {
            contact_id: Some(Uuid::nil().to_string()),
            kind: Some("coffee".to_owned()),
            ..CreateInteractionRequest::default()
        }
    }

    #[rstest]
    fn create_accepts_minimal_payload() {
        let draft = InteractionDraft::try_from(valid_request()).expect("valid draft");
        assert_eq!(draft.kind, "coffee");
        assert!(draft.outcome.is_none());
        assert!(draft.occurred_at.is_none());
    }

    #[rstest]
    #[case("Positive", Some(InteractionOutcome::Positive))]
    #[case(" negative ", Some(InteractionOutcome::Negative))]
    #[case("", None)]
    fn create_normalises_outcome(
        #[case] raw: &str,
        #[case] expected: Option<InteractionOutcome>,
    ) {
        let request = CreateInteractionRequest {
            outcome: Some(raw.to_owned()),
            ..valid_request()
        };
        let draft = InteractionDraft::try_from(request).expect("valid draft");
        assert_eq!(draft.outcome, expected);
    }

    #[rstest]
    fn create_collects_all_violations() {
        let request = CreateInteractionRequest {
            contact_id: Some("nope".to_owned()),
            kind: None,
            outcome: Some("great".to_owned()),
            follow_up_required: Some("tomorrow".to_owned()),
            ..CreateInteractionRequest::default()
        };
        let errors = InteractionDraft::try_from(request).expect_err("invalid");
        let summary: Vec<_> = errors
            .violations()
            .iter()
            .map(|v| (v.field.as_str(), v.code))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("contactId", ViolationCode::InvalidFormat),
                ("type", ViolationCode::MissingField),
                ("outcome", ViolationCode::InvalidOption),
                ("followUpRequired", ViolationCode::InvalidFormat),
            ]
        );
    }

    #[rstest]
    fn update_clears_outcome_with_null() {
        let request: UpdateInteractionRequest =
            serde_json::from_str(r#"{"outcome": null, "type": "call"}"#).expect("valid json");
        let patch = InteractionPatch::try_from(request).expect("valid patch");
        assert_eq!(patch.outcome, Some(None));
        assert_eq!(patch.kind.as_deref(), Some("call"));
        assert_eq!(patch.notes, None);
    }

    #[rstest]
    #[case(INTERACTION_TYPE_MAX, true)]
    #[case(INTERACTION_TYPE_MAX + 1, false)]
    fn create_bounds_type_to_its_column(#[case] len: usize, #[case] accepted: bool) {
        let request = CreateInteractionRequest {
            kind: Some("m".repeat(len)),
            ..valid_request()
        };
        assert_eq!(InteractionDraft::try_from(request).is_ok(), accepted);
    }

    #[rstest]
    fn update_bounds_type_and_subject() {
        let request = UpdateInteractionRequest {
            kind: Some("m".repeat(INTERACTION_TYPE_MAX + 1)),
            subject: Some(Some("s".repeat(WIDE_TEXT_MAX + 1))),
            ..UpdateInteractionRequest::default()
        };
        let errors = InteractionPatch::try_from(request).expect_err("too wide");
        let fields: Vec<_> = errors.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["type", "subject"]);
    }
}
