//! Relationship handlers.
//!
//! ```text
//! GET    /api/relationships
//! POST   /api/relationships
//! DELETE /api/relationships/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::{LONG_TEXT_MAX, RELATIONSHIP_TYPE_MAX};
use crate::domain::{
    DEFAULT_RELATIONSHIP_TYPE, Error, FieldViolation, Relationship, RelationshipDraft,
    ValidationErrors, ViolationCode,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

/// Request payload for `POST /api/relationships`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRelationshipRequest {
    /// Source contact (UUID).
    pub from_contact_id: Option<String>,
    /// Target contact (UUID); must differ from the source.
    pub to_contact_id: Option<String>,
    /// Free-form type; defaults to `connected`.
    #[schema(example = "colleague")]
    pub relationship_type: Option<String>,
    #[schema(minimum = 1, maximum = 5)]
    pub strength: Option<i64>,
    pub notes: Option<String>,
}

impl TryFrom<CreateRelationshipRequest> for RelationshipDraft {
    type Error = ValidationErrors;

    fn try_from(value: CreateRelationshipRequest) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let from_contact_id =
            errors.required_uuid("fromContactId", value.from_contact_id.as_deref());
        let to_contact_id = errors.required_uuid("toContactId", value.to_contact_id.as_deref());
        if let (Some(from), Some(to)) = (from_contact_id, to_contact_id)
            && from == to
        {
            errors.push(FieldViolation::new(
                "toContactId",
                ViolationCode::SelfReference,
                "a contact cannot be related to itself",
            ));
        }
        let relationship_type = errors
            .optional_text("relationshipType", value.relationship_type, RELATIONSHIP_TYPE_MAX)
            .unwrap_or_else(|| DEFAULT_RELATIONSHIP_TYPE.to_owned());
        let strength = errors.strength("strength", value.strength).unwrap_or_default();
        let notes = errors.optional_text("notes", value.notes, LONG_TEXT_MAX);

        errors.finish(Self {
            from_contact_id: from_contact_id.unwrap_or_default(),
            to_contact_id: to_contact_id.unwrap_or_default(),
            relationship_type,
            strength,
            notes,
        })
    }
}

/// List every relationship between the user's contacts.
#[utoipa::path(
    get,
    path = "/api/relationships",
    responses(
        (status = 200, description = "Relationships", body = [Relationship]),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["relationships"],
    operation_id = "listRelationships"
)]
#[get("/relationships")]
pub async fn list_relationships(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Relationship>>> {
    let user_id = session.require_user_id()?;
    let relationships = state.relationships_query.list(&user_id).await?;
    Ok(web::Json(relationships))
}

/// Record a directed relationship between two contacts.
#[utoipa::path(
    post,
    path = "/api/relationships",
    request_body = CreateRelationshipRequest,
    responses(
        (status = 201, description = "Relationship created", body = Relationship),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Contact not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["relationships"],
    operation_id = "createRelationship"
)]
#[post("/relationships")]
pub async fn create_relationship(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateRelationshipRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = RelationshipDraft::try_from(payload.into_inner())?;
    let relationship = state.relationships.create(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(relationship))
}

/// Delete a relationship.
#[utoipa::path(
    delete,
    path = "/api/relationships/{id}",
    params(("id" = String, Path, description = "Relationship identifier (UUID)")),
    responses(
        (status = 200, description = "Relationship deleted", body = MessageResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Relationship not found", body = Error)
    ),
    tags = ["relationships"],
    operation_id = "deleteRelationship"
)]
#[delete("/relationships/{id}")]
pub async fn delete_relationship(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_path_id("id", &path)?;
    state.relationships.delete(&user_id, id).await?;
    Ok(web::Json(MessageResponse::new(
        "Relationship deleted successfully",
    )))
}
