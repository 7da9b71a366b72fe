//! Tag handlers.
//!
//! ```text
//! GET    /api/tags
//! POST   /api/tags
//! DELETE /api/tags/{id}
//! ```
//!
//! Assigning tags to contacts lives with the contact routes.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::validation::TAG_NAME_MAX;
use crate::domain::{Error, FieldViolation, Tag, TagColor, TagDraft, ValidationErrors, ViolationCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_path_id;

/// Request payload for `POST /api/tags`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct CreateTagRequest {
    #[schema(example = "Investor")]
    pub name: Option<String>,
    /// `#RRGGBB`; defaults to `#3B82F6`.
    #[schema(example = "#EC4899")]
    pub color: Option<String>,
}

impl TryFrom<CreateTagRequest> for TagDraft {
    type Error = ValidationErrors;

    fn try_from(value: CreateTagRequest) -> Result<Self, Self::Error> {
        let mut errors = ValidationErrors::new();
        let name = errors.required_text("name", value.name, TAG_NAME_MAX);
        let color = match value.color.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            None => TagColor::default(),
            Some(raw) => TagColor::new(raw).unwrap_or_else(|err| {
                errors.push(FieldViolation::new(
                    "color",
                    ViolationCode::InvalidFormat,
                    err.to_string(),
                ));
                TagColor::default()
            }),
        };

        errors.finish(Self {
            name: name.unwrap_or_default(),
            color,
        })
    }
}

/// List the user's tags ordered by name.
#[utoipa::path(
    get,
    path = "/api/tags",
    responses(
        (status = 200, description = "Tags", body = [Tag]),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["tags"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<Tag>>> {
    let user_id = session.require_user_id()?;
    let tags = state.tags_query.list(&user_id).await?;
    Ok(web::Json(tags))
}

/// Create a tag. Names are unique per user.
#[utoipa::path(
    post,
    path = "/api/tags",
    request_body = CreateTagRequest,
    responses(
        (status = 201, description = "Tag created", body = Tag),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 409, description = "Tag name already used", body = Error)
    ),
    tags = ["tags"],
    operation_id = "createTag"
)]
#[post("/tags")]
pub async fn create_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTagRequest>,
) -> ApiResult<HttpResponse> {
    let user_id = session.require_user_id()?;
    let draft = TagDraft::try_from(payload.into_inner())?;
    let tag = state.tags.create(&user_id, draft).await?;
    Ok(HttpResponse::Created().json(tag))
}

/// Delete a tag and its assignments.
#[utoipa::path(
    delete,
    path = "/api/tags/{id}",
    params(("id" = String, Path, description = "Tag identifier (UUID)")),
    responses(
        (status = 200, description = "Tag deleted", body = MessageResponse),
        (status = 400, description = "Malformed identifier", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Tag not found", body = Error)
    ),
    tags = ["tags"],
    operation_id = "deleteTag"
)]
#[delete("/tags/{id}")]
pub async fn delete_tag(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let user_id = session.require_user_id()?;
    let id = parse_path_id("id", &path)?;
    state.tags.delete(&user_id, id).await?;
    Ok(web::Json(MessageResponse::new("Tag deleted successfully")))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::json;

    use crate::domain::test_fixtures::fixture_timestamp;
    use crate::inbound::http::test_utils::{MockPorts, init_api, json_body, login};

    #[rstest]
    #[case(None, "#3B82F6")]
    #[case(Some(""), "#3B82F6")]
    #[case(Some("#ec4899"), "#EC4899")]
    fn colour_defaults_and_normalises(#[case] color: Option<&str>, #[case] expected: &str) {
        let draft = TagDraft::try_from(CreateTagRequest {
            name: Some("Investor".to_owned()),
            color: color.map(str::to_owned),
        })
        .expect("valid draft");
        assert_eq!(draft.color.as_str(), expected);
    }

    #[rstest]
    #[case(TAG_NAME_MAX, true)]
    #[case(TAG_NAME_MAX + 1, false)]
    fn name_is_bounded_by_its_column(#[case] len: usize, #[case] accepted: bool) {
        let outcome = TagDraft::try_from(CreateTagRequest {
            name: Some("n".repeat(len)),
            color: None,
        });
        assert_eq!(outcome.is_ok(), accepted);
    }

    #[rstest]
    fn invalid_colour_and_blank_name_are_both_reported() {
        let errors = TagDraft::try_from(CreateTagRequest {
            name: Some(" ".to_owned()),
            color: Some("pink".to_owned()),
        })
        .expect_err("invalid");
        let fields: Vec<_> = errors.violations().iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "color"]);
    }

    #[actix_web::test]
    async fn create_returns_created_tag() {
        let mut ports = MockPorts::default();
        ports
            .tags
            .expect_create()
            .times(1)
            .returning(|user_id, draft| {
                Ok(Tag {
                    id: uuid::Uuid::new_v4(),
                    user_id: *user_id,
                    name: draft.name,
                    color: draft.color,
                    created_at: fixture_timestamp(),
                })
            });
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/tags")
                .cookie(cookie)
                .set_json(json!({ "name": "Investor" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body.get("color"), Some(&json!("#3B82F6")));
    }

    #[actix_web::test]
    async fn duplicate_name_is_conflict() {
        let mut ports = MockPorts::default();
        ports
            .tags
            .expect_create()
            .returning(|_, _| Err(Error::conflict("tag name already exists")));
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/tags")
                .cookie(cookie)
                .set_json(json!({ "name": "Investor", "color": "#EC4899" }))
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = json_body(response).await;
        assert_eq!(body.get("code"), Some(&json!("conflict")));
    }

    #[actix_web::test]
    async fn list_returns_tags() {
        let mut ports = MockPorts::default();
        ports
            .tags_query
            .expect_list()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let app = init_api(ports).await;
        let cookie = login(&app).await;

        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/tags")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }
}
