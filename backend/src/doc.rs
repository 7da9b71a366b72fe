//! OpenAPI documentation for the CRM REST API.
//!
//! [`ApiDoc`] collects every `#[utoipa::path]` handler and the payload
//! schemas they reference. Swagger UI serves it at `/docs` in debug builds and
//! `openapi-dump` prints it for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Contact, ContactDetails, Error, ErrorCode, FieldViolation, GraphLink, GraphNode, Interaction,
    InteractionOutcome, InteractionWithContact, NetworkGraph, NetworkStats, Relationship, Tag,
    User, ViolationCode,
};
use crate::inbound::http::auth::LoginRequest;
use crate::inbound::http::contacts::{CreateContactRequest, UpdateContactRequest};
use crate::inbound::http::interactions::{CreateInteractionRequest, UpdateInteractionRequest};
use crate::inbound::http::relationships::CreateRelationshipRequest;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::tags::CreateTagRequest;

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Personal CRM API",
        description = "Contacts, interactions, relationships, tags and network analytics for a single signed-in user."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::search_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::contacts::assign_tag,
        crate::inbound::http::contacts::unassign_tag,
        crate::inbound::http::interactions::list_interactions,
        crate::inbound::http::interactions::create_interaction,
        crate::inbound::http::interactions::update_interaction,
        crate::inbound::http::interactions::delete_interaction,
        crate::inbound::http::relationships::list_relationships,
        crate::inbound::http::relationships::create_relationship,
        crate::inbound::http::relationships::delete_relationship,
        crate::inbound::http::tags::list_tags,
        crate::inbound::http::tags::create_tag,
        crate::inbound::http::tags::delete_tag,
        crate::inbound::http::network::network_stats,
        crate::inbound::http::network::network_graph,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        Contact,
        ContactDetails,
        Interaction,
        InteractionOutcome,
        InteractionWithContact,
        Relationship,
        Tag,
        NetworkStats,
        NetworkGraph,
        GraphNode,
        GraphLink,
        Error,
        ErrorCode,
        FieldViolation,
        ViolationCode,
        MessageResponse,
        LoginRequest,
        CreateContactRequest,
        UpdateContactRequest,
        CreateInteractionRequest,
        UpdateInteractionRequest,
        CreateRelationshipRequest,
        CreateTagRequest,
    )),
    tags(
        (name = "auth", description = "Session login and logout"),
        (name = "contacts", description = "Contact records and tag assignment"),
        (name = "interactions", description = "Logged touchpoints with contacts"),
        (name = "relationships", description = "Links between two contacts"),
        (name = "tags", description = "Colour-coded contact labels"),
        (name = "analytics", description = "Network statistics and graph"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
