//! Contact request DTOs and their validation into domain drafts and patches.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::validation::{
    CATEGORY_MAX, LINKEDIN_URL_MAX, LONG_TEXT_MAX, PHONE_MAX, SHORT_TEXT_MAX, WIDE_TEXT_MAX,
};
use crate::domain::{ContactDraft, ContactPatch, ValidationErrors};
use crate::inbound::http::validation::deserialize_some;

/// Query string for `GET /api/contacts`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListContactsParams {
    /// Page size in `1..=200`; defaults to 50.
    pub limit: Option<i64>,
}

/// Query string for `GET /api/contacts/search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchContactsParams {
    /// Case-insensitive text matched against names, email, company and title.
    pub q: Option<String>,
}

/// Request payload for `POST /api/contacts`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[schema(example = "Ada")]
    pub first_name: Option<String>,
    #[schema(example = "Lovelace")]
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub linkedin_url: Option<String>,
    #[schema(example = "mentor")]
    pub category: Option<String>,
    #[schema(minimum = 1, maximum = 5)]
    pub relationship_strength: Option<i64>,
    pub contact_source: Option<String>,
    pub notes: Option<String>,
}

impl TryFrom<CreateContactRequest> for ContactDraft {
    type Error = ValidationErrors;

    fn try_from(value: CreateContactRequest) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let first_name = errors.required_text("firstName", value.first_name, SHORT_TEXT_MAX);
        let last_name = errors.required_text("lastName", value.last_name, SHORT_TEXT_MAX);
        let email = errors.optional_text("email", value.email, WIDE_TEXT_MAX);
        let phone = errors.optional_text("phone", value.phone, PHONE_MAX);
        let company = errors.optional_text("company", value.company, WIDE_TEXT_MAX);
        let title = errors.optional_text("title", value.title, WIDE_TEXT_MAX);
        let location = errors.optional_text("location", value.location, WIDE_TEXT_MAX);
        let linkedin_url = errors.optional_text("linkedinUrl", value.linkedin_url, LINKEDIN_URL_MAX);
        let category = errors.required_text("category", value.category, CATEGORY_MAX);
        let relationship_strength = errors
            .strength("relationshipStrength", value.relationship_strength)
            .unwrap_or_default();
        let contact_source =
            errors.optional_text("contactSource", value.contact_source, SHORT_TEXT_MAX);
        let notes = errors.optional_text("notes", value.notes, LONG_TEXT_MAX);

        errors.finish(Self {
            first_name: first_name.unwrap_or_default(),
            last_name: last_name.unwrap_or_default(),
            email,
            phone,
            company,
            title,
            location,
            linkedin_url,
            category: category.unwrap_or_default(),
            relationship_strength,
            contact_source,
            notes,
        })
    }
}

/// Request payload for `PUT /api/contacts/{id}`.
///
/// Omitted fields are left unchanged. `null` clears an optional field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub company: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub linkedin_url: Option<Option<String>>,
    pub category: Option<String>,
    #[schema(minimum = 1, maximum = 5)]
    pub relationship_strength: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub contact_source: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

fn nullable(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<Option<String>>,
    max: usize,
) -> Option<Option<String>> {
    value.map(|inner| errors.optional_text(field, inner, max))
}

impl TryFrom<UpdateContactRequest> for ContactPatch {
    type Error = ValidationErrors;

    fn try_from(value: UpdateContactRequest) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let first_name = value
            .first_name
            .and_then(|raw| errors.required_text("firstName", Some(raw), SHORT_TEXT_MAX));
        let last_name = value
            .last_name
            .and_then(|raw| errors.required_text("lastName", Some(raw), SHORT_TEXT_MAX));
        let email = nullable(&mut errors, "email", value.email, WIDE_TEXT_MAX);
        let phone = nullable(&mut errors, "phone", value.phone, PHONE_MAX);
        let company = nullable(&mut errors, "company", value.company, WIDE_TEXT_MAX);
        let title = nullable(&mut errors, "title", value.title, WIDE_TEXT_MAX);
        let location = nullable(&mut errors, "location", value.location, WIDE_TEXT_MAX);
        let linkedin_url = nullable(&mut errors, "linkedinUrl", value.linkedin_url, LINKEDIN_URL_MAX);
        let category = value
            .category
            .and_then(|raw| errors.required_text("category", Some(raw), CATEGORY_MAX));
        let relationship_strength =
            errors.strength("relationshipStrength", value.relationship_strength);
        let contact_source = nullable(
            &mut errors,
            "contactSource",
            value.contact_source,
            SHORT_TEXT_MAX,
        );
        let notes = nullable(&mut errors, "notes", value.notes, LONG_TEXT_MAX);

        errors.finish(Self {
            first_name,
            last_name,
            email,
            phone,
            company,
            title,
            location,
            linkedin_url,
            category,
            relationship_strength,
            contact_source,
            notes,
        })
    }
}
