//! Login and logout handlers.
//!
//! ```text
//! POST /api/login {"username":"demo_user","password":"demo_password"}
//! POST /api/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Error, FieldViolation, LoginCredentials, LoginValidationError, User, ValidationErrors,
    ViolationCode,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "demo_user")]
    pub username: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    let field = match err {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    ValidationErrors::from(FieldViolation::new(
        field,
        ViolationCode::MissingField,
        err.to_string(),
    ))
    .into()
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Database unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<User>> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user.id)?;
    Ok(web::Json(user))
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use chrono::{DateTime, Utc};
    use rstest::rstest;
    use serde_json::json;

    use crate::inbound::http::test_utils::{
        MockPorts, fixture_user_id, init_api, json_body, session_cookie,
    };

    fn demo_user() -> User {
        User {
            id: fixture_user_id(),
            username: "demo_user".to_owned(),
            email: Some("demo@example.com".to_owned()),
            first_name: Some("John".to_owned()),
            last_name: Some("Smith".to_owned()),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    fn login_request(username: &str, password: &str) -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri("/api/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request()
    }

    #[actix_web::test]
    async fn login_sets_session_and_returns_user() {
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_authenticate()
            .withf(|creds| creds.username() == "demo_user" && creds.password() == "secret")
            .times(1)
            .returning(|_| Ok(demo_user()));
        let app = init_api(ports).await;

        let response = actix_test::call_service(&app, login_request(" demo_user ", "secret")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = session_cookie(&response);
        assert!(!cookie.value().is_empty());
        let body = json_body(response).await;
        assert_eq!(body.get("username"), Some(&json!("demo_user")));
        assert!(body.get("passwordHash").is_none());
    }

    #[rstest]
    #[case("   ", "secret", "username")]
    #[case("demo_user", "", "password")]
    #[actix_web::test]
    async fn blank_credentials_are_rejected(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let app = init_api(MockPorts::default()).await;

        let response = actix_test::call_service(&app, login_request(username, password)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body.get("code"), Some(&json!("invalid_request")));
        assert_eq!(
            body.pointer("/details/fields/0/field"),
            Some(&json!(field))
        );
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let mut ports = MockPorts::default();
        ports
            .login
            .expect_authenticate()
            .returning(|_| Err(Error::unauthorized("invalid credentials")));
        let app = init_api(ports).await;

        let response = actix_test::call_service(&app, login_request("demo_user", "nope")).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn logout_clears_the_session() {
        let mut ports = MockPorts::default();
        ports.login.expect_authenticate().returning(|_| Ok(demo_user()));
        ports.tags_query.expect_list().never();
        let app = init_api(ports).await;

        let login_res = actix_test::call_service(&app, login_request("demo_user", "secret")).await;
        let cookie = session_cookie(&login_res);

        let logout_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/logout")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(logout_res.status(), StatusCode::NO_CONTENT);
        let cleared = session_cookie(&logout_res);
        assert!(cleared.value().is_empty());

        let after = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api/tags")
                .cookie(cleared)
                .to_request(),
        )
        .await;
        assert_eq!(after.status(), StatusCode::UNAUTHORIZED);
    }
}
