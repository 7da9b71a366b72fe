//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_http::Request;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::ports::{
    MockContactsCommand, MockContactsQuery, MockInteractionsCommand, MockInteractionsQuery,
    MockLoginService, MockNetworkQuery, MockRelationshipsCommand, MockRelationshipsQuery,
    MockTagsCommand, MockTagsQuery,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::configure_api;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{json_config, query_config};

/// User id stored in the session by [`login`].
pub const FIXTURE_USER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

/// Parsed [`FIXTURE_USER_ID`].
pub fn fixture_user_id() -> UserId {
    UserId::new(FIXTURE_USER_ID).expect("fixture user id is valid")
}

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Bare app with session support.
pub fn session_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().wrap(test_session_middleware())
}

/// Extract the session cookie set by a response.
pub fn session_cookie(response: &ServiceResponse) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Mocked driving ports. Set expectations on the fields, then call
/// [`MockPorts::into_state`].
#[derive(Default)]
pub struct MockPorts {
    pub login: MockLoginService,
    pub contacts: MockContactsCommand,
    pub contacts_query: MockContactsQuery,
    pub interactions: MockInteractionsCommand,
    pub interactions_query: MockInteractionsQuery,
    pub relationships: MockRelationshipsCommand,
    pub relationships_query: MockRelationshipsQuery,
    pub tags: MockTagsCommand,
    pub tags_query: MockTagsQuery,
    pub network: MockNetworkQuery,
}

impl MockPorts {
    /// Wrap every mock in an `Arc` to build handler state.
    pub fn into_state(self) -> HttpState {
        HttpState {
            login: Arc::new(self.login),
            contacts: Arc::new(self.contacts),
            contacts_query: Arc::new(self.contacts_query),
            interactions: Arc::new(self.interactions),
            interactions_query: Arc::new(self.interactions_query),
            relationships: Arc::new(self.relationships),
            relationships_query: Arc::new(self.relationships_query),
            tags: Arc::new(self.tags),
            tags_query: Arc::new(self.tags_query),
            network: Arc::new(self.network),
        }
    }
}

async fn login_fixture(session: SessionContext) -> Result<HttpResponse, Error> {
    session.persist_user(&fixture_user_id())?;
    Ok(HttpResponse::NoContent().finish())
}

/// Initialise the full `/api` surface over mocked ports.
///
/// `POST /test/login` stores [`FIXTURE_USER_ID`] in the session.
pub async fn init_api(
    ports: MockPorts,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(
        session_app()
            .app_data(web::Data::new(ports.into_state()))
            .app_data(json_config())
            .app_data(query_config())
            .route("/test/login", web::post().to(login_fixture))
            .service(web::scope("/api").configure(configure_api)),
    )
    .await
}

/// Obtain a session cookie for [`FIXTURE_USER_ID`].
pub async fn login<S>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let response =
        test::call_service(app, test::TestRequest::post().uri("/test/login").to_request()).await;
    session_cookie(&response)
}

/// Read a JSON response body.
pub async fn json_body(response: ServiceResponse) -> serde_json::Value {
    let body = test::read_body(response).await;
    serde_json::from_slice(&body).expect("JSON response body")
}
