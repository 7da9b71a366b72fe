//! Interaction handlers.
//!
//! ```text
//! GET    /api/interactions?contactId=&limit=
//! POST   /api/interactions
//! PUT    /api/interactions/{id}
//! DELETE /api/interactions/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{
    Error, Interaction, InteractionDraft, InteractionPatch, InteractionWithContact,
    ValidationErrors,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{parse_limit, parse_path_id};

pub use super::interactions_dto::{
    CreateInteractionRequest, ListInteractionsParams, UpdateInteractionRequest,
};

/// List interactions joined with their contact, newest first.
#[utoipa::path(
    get,
    path = "/api/interactions",
    params(ListInteractionsParams),
    responses(
        (status = 200, description = "Interactions", body = [InteractionWithContact]),
        (status = 400, description = "Invalid filter or limit", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["interactions"],
    operation_id = "listInteractions"
)]
#[get("/interactions")]
pub async fn list_interactions(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<ListInteractionsParams>,
) -> ApiResult<web::Json<Vec<InteractionWithContact>>> {
    let user_id = session.require_user_id()?;
    let ListInteractionsParams { contact_id, limit } = params.into_inner();
    let mut errors = ValidationErrors::new();
    let contact_id = errors.uuid("contactId", contact_id.as_deref());
    let contact_id = errors.finish(contact_id)?;
    let limit = parse_limit(limit)?;
    let interactions = state
        .interactions_query
        .list(&user_id, contact_id, limit)
        .await?;
    Ok(web::Json(interactions))
}

/// Log an interaction and mark its contact as recently active.
#[utoipa::path(
    post,
    path = "/api/interactions",
    request_body = CreateInteractionRequest,
    responses(
        (status = 201, description = "Interaction created", body = Interaction),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Contact not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["interactions"],
    operation_id = "createInteraction"
)]
#[post("/interactions")]
pub async fn create_interaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateInteractionRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = InteractionDraft::try_from(payload.into_inner())?;
    let interaction = state.interactions.create(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(interaction))
}

/// Partially update an interaction.
#[utoipa::path(
    put,
    path = "/api/interactions/{id}",
    params(("id" = String, Path, description = "Interaction identifier (UUID)")),
    request_body = UpdateInteractionRequest,
    responses(
        (status = 200, description = "Interaction updated", body = Interaction),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Interaction not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["interactions"],
    operation_id = "updateInteraction"
)]
#[put("/interactions/{id}")]
pub async fn update_interaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateInteractionRequest>,
) -> ApiResult<web::Json<Interaction>> {
    let user_id = session.require_user_id()?;
    let id = parse_path_id("id", &path)?;
    let patch = InteractionPatch::try_from(payload.into_inner())?;
    let interaction = state.interactions.update(&user_id, id, patch).await?;
    Ok(web::Json(interaction))
}

/// Delete an interaction.
#[utoipa::path(
    delete,
    path = "/api/interactions/{id}",
    params(("id" = String, Path, description = "Interaction identifier (UUID)")),
    responses(
        (status = 200, description = "Interaction deleted", body = MessageResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Interaction not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["interactions"],
    operation_id = "deleteInteraction"
)]
#[delete("/interactions/{id}")]
pub async fn delete_interaction(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_path_id("id", &path)?;
    state.interactions.delete(&user_id, id).await?;
    Ok(web::Json(MessageResponse::new(
        "Interaction deleted successfully",
    )))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::json;
    use uuid::Uuid;

    use crate::domain::test_fixtures::{fixture_timestamp, sample_contact, sample_interaction};
    use crate::domain::{FieldViolation, ListLimit, ViolationCode};
    use crate::inbound::http::test_utils::{
        MockPorts, fixture_user_id, init_api, json_body, login,
    };

    #[actix_web::test]
    async fn list_filters_by_contact() {
        let contact = sample_contact(fixture_user_id(), "Grace", "Hopper");
        let contact_id = contact.id;
        let row = InteractionWithContact {
            interaction: sample_interaction(&contact, fixture_timestamp()),
            contact,
        };
        let mut ports = MockPorts::default();
        ports
            .interactions_query
            .expect_list()
            .withf(move |_, filter, limit| {
                *filter == Some(contact_id) && limit.get() == 10
            })
            .times(1)
            .return_once(move |_, _, _| Ok(vec![row]));
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/interactions?contactId={contact_id}&limit=10"))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body.pointer("/0/contact/firstName"), Some(&json!("Grace")));
        assert_eq!(body.pointer("/0/outcome"), Some(&json!("positive")));
    }

    #[actix_web::test]
    async fn list_without_filter_uses_defaults() {
        let mut ports = MockPorts::default();
        ports
            .interactions_query
            .expect_list()
            .withf(|_, filter, limit| filter.is_none() && *limit == ListLimit::default())
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/interactions")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn list_rejects_malformed_contact_filter() {
        let mut ports = MockPorts::default();
        ports.interactions_query.expect_list().never();
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/interactions?contactId=abc")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body.pointer("/details/fields/0/field"),
            Some(&json!("contactId"))
        );
    }

    #[actix_web::test]
    async fn create_returns_created_interaction() {
        let contact = sample_contact(fixture_user_id(), "Grace", "Hopper");
        let contact_id = contact.id;
        let interaction = sample_interaction(&contact, fixture_timestamp());
        let mut ports = MockPorts::default();
        ports
            .interactions
            .expect_create()
            .withf(move |_, draft| draft.contact_id == contact_id && draft.kind == "call")
            .times(1)
            .return_once(move |_, _| Ok(interaction));
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/interactions")
                .cookie(cookie)
                .set_json(json!({
                    "contactId": contact_id,
                    "type": "call",
                    "outcome": "positive",
                    "followUpRequired": "2024-04-07T09:00:00Z"
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body.get("contactId"), Some(&json!(contact_id)));
    }

    #[actix_web::test]
    async fn future_created_at_is_reported_as_validation_error() {
        let mut ports = MockPorts::default();
        ports.interactions.expect_create().returning(|_, _| {
            Err(ValidationErrors::from(FieldViolation::new(
                "createdAt",
                ViolationCode::InFuture,
                "createdAt must not be in the future",
            ))
            .into())
        });
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/interactions")
                .cookie(cookie)
                .set_json(json!({
                    "contactId": Uuid::new_v4(),
                    "type": "call",
                    "createdAt": "2999-01-01T00:00:00Z"
                }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(
            body.pointer("/details/fields/0/code"),
            Some(&json!("in_future"))
        );
    }

    #[actix_web::test]
    async fn create_for_unknown_contact_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .interactions
            .expect_create()
            .returning(|_, _| Err(Error::not_found("contact not found")));
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/interactions")
                .cookie(cookie)
                .set_json(json!({ "contactId": Uuid::new_v4(), "type": "email" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_missing_interaction_is_not_found() {
        let mut ports = MockPorts::default();
        ports
            .interactions
            .expect_delete()
            .returning(|_, _| Err(Error::not_found("interaction not found")));
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::delete()
                .uri(&format!("/api/interactions/{}", Uuid::new_v4()))
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn update_forwards_patch() {
        let contact = sample_contact(fixture_user_id(), "Grace", "Hopper");
        let interaction = sample_interaction(&contact, fixture_timestamp());
        let id = interaction.id;
        let mut ports = MockPorts::default();
        ports
            .interactions
            .expect_update()
            .withf(move |_, requested, patch| {
                *requested == id && patch.subject == Some(Some("Follow-up".to_owned()))
            })
            .times(1)
            .return_once(move |_, _, _| Ok(interaction));
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::put()
                .uri(&format!("/api/interactions/{id}"))
                .cookie(cookie)
                .set_json(json!({ "subject": "Follow-up" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
    }
}
