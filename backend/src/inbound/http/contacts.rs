//! Contact handlers.
//!
//! ```text
//! GET    /api/contacts?limit=50
//! GET    /api/contacts/search?q=chen
//! GET    /api/contacts/{id}
//! POST   /api/contacts
//! PUT    /api/contacts/{id}
//! DELETE /api/contacts/{id}
//! PUT    /api/contacts/{id}/tags/{tagId}
//! DELETE /api/contacts/{id}/tags/{tagId}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::validation::SHORT_TEXT_MAX;
use crate::domain::{Contact, ContactDetails, ContactDraft, ContactPatch, Error, ValidationErrors};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_limit, parse_path_id};

pub use super::contacts_dto::{
    CreateContactRequest, ListContactsParams, SearchContactsParams, UpdateContactRequest,
};

/// List contacts, most recently updated first, with their interactions.
#[utoipa::path(
    get,
    path = "/api/contacts",
    params(ListContactsParams),
    responses(
        (status = 200, description = "Contacts", body = [ContactDetails]),
        (status = 400, description = "Invalid limit", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<ListContactsParams>,
) -> ApiResult<web::Json<Vec<ContactDetails>>> {
    let user_id = session.require_user_id()?;
    let limit = parse_limit(params.limit)?;
    let contacts = state.contacts_query.list(&user_id, limit).await?;
    Ok(web::Json(contacts))
}

/// Case-insensitive substring search over names, email, company and title.
#[utoipa::path(
    get,
    path = "/api/contacts/search",
    params(SearchContactsParams),
    responses(
        (status = 200, description = "Matching contacts", body = [ContactDetails]),
        (status = 400, description = "Missing or blank query", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "searchContacts"
)]
#[get("/contacts/search")]
pub async fn search_contacts(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<SearchContactsParams>,
) -> ApiResult<web::Json<Vec<ContactDetails>>> {
    let user_id = session.require_user_id()?;
    let mut errors = ValidationErrors::new();
    let query = errors.required_text("q", params.into_inner().q, SHORT_TEXT_MAX);
    let query = errors.finish(query)?.unwrap_or_default();
    let contacts = state.contacts_query.search(&user_id, &query).await?;
    Ok(web::Json(contacts))
}

/// Fetch one contact with its interactions and tags.
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier (UUID)")),
    responses(
        (status = 200, description = "Contact", body = ContactDetails),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Contact not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContactDetails>> {
    let user_id = session.require_user_id()?;
    let id = parse_path_id("id", &path)?;
    let contact = state.contacts_query.get(&user_id, id).await?;
    Ok(web::Json(contact))
}

/// Create a contact.
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = CreateContactRequest,
    responses(
        (status = 201, description = "Contact created", body = Contact),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateContactRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = ContactDraft::try_from(payload.into_inner())?;
    let contact = state.contacts.create(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(contact))
}

/// Partially update a contact.
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier (UUID)")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Contact updated", body = Contact),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Contact not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateContactRequest>,
) -> ApiResult<web::Json<Contact>> {
    let user_id = session.require_user_id()?;
    let id = parse_path_id("id", &path)?;
    let patch = ContactPatch::try_from(payload.into_inner())?;
    let contact = state.contacts.update(&user_id, id, patch).await?;
    Ok(web::Json(contact))
}

/// Delete a contact with its interactions, relationships and tag links.
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = String, Path, description = "Contact identifier (UUID)")),
    responses(
        (status = 200, description = "Contact deleted", body = MessageResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Contact not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_path_id("id", &path)?;
    state.contacts.delete(&user_id, id).await?;
    Ok(web::Json(MessageResponse::new("Contact deleted successfully")))
}

fn parse_tag_path(path: &(String, String)) -> Result<(uuid::Uuid, uuid::Uuid), Error> {
    let (contact_id, tag_id) = path;
    Ok((parse_path_id("id", contact_id)?, parse_path_id("tagId", tag_id)?))
}

/// Attach a tag to a contact. Re-assigning is a no-op.
#[utoipa::path(
    put,
    path = "/api/contacts/{id}/tags/{tag_id}",
    params(
        ("id" = String, Path, description = "Contact identifier (UUID)"),
        ("tag_id" = String, Path, description = "Tag identifier (UUID)")
    ),
    responses(
        (status = 204, description = "Tag assigned"),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Contact or tag not found", body = Error)
    ),
    tags = ["tags"],
    operation_id = "assignTag"
)]
#[put("/contacts/{id}/tags/{tag_id}")]
pub async fn assign_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let (contact_id, tag_id) = parse_tag_path(&path)?;
    state.tags.assign(&user_id, contact_id, tag_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Detach a tag from a contact.
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}/tags/{tag_id}",
    params(
        ("id" = String, Path, description = "Contact identifier (UUID)"),
        ("tag_id" = String, Path, description = "Tag identifier (UUID)")
    ),
    responses(
        (status = 204, description = "Tag removed"),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Contact or tag not found", body = Error)
    ),
    tags = ["tags"],
    operation_id = "unassignTag"
)]
#[delete("/contacts/{id}/tags/{tag_id}")]
pub async fn unassign_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let (contact_id, tag_id) = parse_tag_path(&path)?;
    state.tags.unassign(&user_id, contact_id, tag_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
