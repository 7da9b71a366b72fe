//! Typed wrappers over the REST routes.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use crate::error::ClientError;
use crate::model::{
    Contact, ContactDetails, ContactUpdate, Interaction, InteractionUpdate,
    InteractionWithContact, MessageResponse, NetworkGraph, NetworkStats, NewContact,
    NewInteraction, NewRelationship, NewTag, Relationship, Tag, User,
};

/// Queries shorter than this, once trimmed, return no results without a
/// request.
pub const MIN_SEARCH_CHARS: usize = 3;

/// HTTP client bound to one API deployment.
///
/// The session cookie set by [`ApiClient::login`] is kept in the client's
/// cookie store and sent with every later call. Clones share the store.
///
/// # Examples
///
/// ```no_run
/// use crm_client::ApiClient;
///
/// # async fn run() -> Result<(), crm_client::ClientError> {
/// let api = ApiClient::new("http://localhost:8080")?;
/// api.login("demo_user", "demo123").await?;
/// let stats = api.network_stats().await?;
/// println!("{} contacts", stats.total_contacts);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    /// Build a client for the deployment rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` is not an absolute URL or the HTTP client cannot
    /// be built.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder().cookie_store(true).build()?;
        Self::with_client(http, base_url)
    }

    /// Use a preconfigured `reqwest` client. It must keep cookies for the
    /// session to survive between calls.
    ///
    /// # Errors
    ///
    /// Fails when `base_url` is not an absolute URL.
    pub fn with_client(http: Client, base_url: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { http, base })
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "api request");
        Ok(self.http.request(method, url))
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = checked(builder.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_empty(builder: RequestBuilder) -> Result<(), ClientError> {
        checked(builder.send().await?).await?;
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        Self::send_json(self.request(Method::GET, path)?).await
    }

    async fn send_body<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        Self::send_json(self.request(method, path)?.json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<MessageResponse, ClientError> {
        Self::send_json(self.request(Method::DELETE, path)?).await
    }

    /// `POST /api/login`; stores the session cookie.
    ///
    /// # Errors
    ///
    /// Returns a 401 [`ClientError::Api`] for wrong credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, ClientError> {
        let body = json!({ "username": username, "password": password });
        self.send_body(Method::POST, "api/login", &body).await
    }

    /// `POST /api/logout`.
    ///
    /// # Errors
    ///
    /// Returns transport failures and unexpected statuses.
    pub async fn logout(&self) -> Result<(), ClientError> {
        Self::send_empty(self.request(Method::POST, "api/logout")?).await
    }

    /// `GET /api/contacts`.
    ///
    /// # Errors
    ///
    /// Returns a 400 [`ClientError::Api`] for a limit outside `1..=200`.
    pub async fn list_contacts(&self, limit: Option<u32>) -> Result<Vec<ContactDetails>, ClientError> {
        let mut builder = self.request(Method::GET, "api/contacts")?;
        if let Some(limit) = limit {
            builder = builder.query(&[("limit", limit)]);
        }
        Self::send_json(builder).await
    }

    /// `GET /api/contacts/search`.
    ///
    /// A trimmed query shorter than [`MIN_SEARCH_CHARS`] returns an empty
    /// list without contacting the server.
    ///
    /// # Errors
    ///
    /// Returns transport failures and error responses.
    pub async fn search_contacts(&self, query: &str) -> Result<Vec<ContactDetails>, ClientError> {
        let Some(query) = searchable(query) else {
            return Ok(Vec::new());
        };
        let builder = self
            .request(Method::GET, "api/contacts/search")?
            .query(&[("q", query)]);
        Self::send_json(builder).await
    }

    /// `GET /api/contacts/{id}`.
    ///
    /// # Errors
    ///
    /// Returns a 404 [`ClientError::Api`] for missing or foreign contacts.
    pub async fn get_contact(&self, id: Uuid) -> Result<ContactDetails, ClientError> {
        self.get(&format!("api/contacts/{id}")).await
    }

    /// `POST /api/contacts`.
    ///
    /// # Errors
    ///
    /// Returns a 400 [`ClientError::Api`] listing invalid fields.
    pub async fn create_contact(&self, contact: &NewContact) -> Result<Contact, ClientError> {
        self.send_body(Method::POST, "api/contacts", contact).await
    }

    /// `PUT /api/contacts/{id}`.
    ///
    /// # Errors
    ///
    /// Returns 400 or 404 [`ClientError::Api`] errors.
    pub async fn update_contact(
        &self,
        id: Uuid,
        update: &ContactUpdate,
    ) -> Result<Contact, ClientError> {
        self.send_body(Method::PUT, &format!("api/contacts/{id}"), update)
            .await
    }

    /// `DELETE /api/contacts/{id}`.
    ///
    /// # Errors
    ///
    /// Returns a 404 [`ClientError::Api`] for missing or foreign contacts.
    pub async fn delete_contact(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("api/contacts/{id}")).await
    }

    /// `PUT /api/contacts/{id}/tags/{tag_id}`.
    ///
    /// # Errors
    ///
    /// Returns a 404 [`ClientError::Api`] when either side is missing.
    pub async fn assign_tag(&self, contact_id: Uuid, tag_id: Uuid) -> Result<(), ClientError> {
        let path = format!("api/contacts/{contact_id}/tags/{tag_id}");
        Self::send_empty(self.request(Method::PUT, &path)?).await
    }

    /// `DELETE /api/contacts/{id}/tags/{tag_id}`.
    ///
    /// # Errors
    ///
    /// Returns a 404 [`ClientError::Api`] when the link does not exist.
    pub async fn unassign_tag(&self, contact_id: Uuid, tag_id: Uuid) -> Result<(), ClientError> {
        let path = format!("api/contacts/{contact_id}/tags/{tag_id}");
        Self::send_empty(self.request(Method::DELETE, &path)?).await
    }

    /// `GET /api/interactions`, optionally for one contact.
    ///
    /// # Errors
    ///
    /// Returns transport failures and error responses.
    pub async fn list_interactions(
        &self,
        contact_id: Option<Uuid>,
        limit: Option<u32>,
    ) -> Result<Vec<InteractionWithContact>, ClientError> {
        let mut builder = self.request(Method::GET, "api/interactions")?;
        if let Some(contact_id) = contact_id {
            builder = builder.query(&[("contactId", contact_id)]);
        }
        if let Some(limit) = limit {
            builder = builder.query(&[("limit", limit)]);
        }
        Self::send_json(builder).await
    }

    /// `POST /api/interactions`.
    ///
    /// # Errors
    ///
    /// Returns 400 or 404 [`ClientError::Api`] errors.
    pub async fn create_interaction(
        &self,
        interaction: &NewInteraction,
    ) -> Result<Interaction, ClientError> {
        self.send_body(Method::POST, "api/interactions", interaction)
            .await
    }

    /// `PUT /api/interactions/{id}`.
    ///
    /// # Errors
    ///
    /// Returns 400 or 404 [`ClientError::Api`] errors.
    pub async fn update_interaction(
        &self,
        id: Uuid,
        update: &InteractionUpdate,
    ) -> Result<Interaction, ClientError> {
        self.send_body(Method::PUT, &format!("api/interactions/{id}"), update)
            .await
    }

    /// `DELETE /api/interactions/{id}`.
    ///
    /// # Errors
    ///
    /// Returns a 404 [`ClientError::Api`] for missing interactions.
    pub async fn delete_interaction(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("api/interactions/{id}")).await
    }

    /// `GET /api/relationships`.
    ///
    /// # Errors
    ///
    /// Returns transport failures and error responses.
    pub async fn list_relationships(&self) -> Result<Vec<Relationship>, ClientError> {
        self.get("api/relationships").await
    }

    /// `POST /api/relationships`.
    ///
    /// # Errors
    ///
    /// Returns 400 or 404 [`ClientError::Api`] errors.
    pub async fn create_relationship(
        &self,
        relationship: &NewRelationship,
    ) -> Result<Relationship, ClientError> {
        self.send_body(Method::POST, "api/relationships", relationship)
            .await
    }

    /// `DELETE /api/relationships/{id}`.
    ///
    /// # Errors
    ///
    /// Returns a 404 [`ClientError::Api`] for missing relationships.
    pub async fn delete_relationship(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("api/relationships/{id}")).await
    }

    /// `GET /api/tags`.
    ///
    /// # Errors
    ///
    /// Returns transport failures and error responses.
    pub async fn list_tags(&self) -> Result<Vec<Tag>, ClientError> {
        self.get("api/tags").await
    }

    /// `POST /api/tags`.
    ///
    /// # Errors
    ///
    /// Returns 400, or 409 for a duplicate name.
    pub async fn create_tag(&self, tag: &NewTag) -> Result<Tag, ClientError> {
        self.send_body(Method::POST, "api/tags", tag).await
    }

    /// `DELETE /api/tags/{id}`.
    ///
    /// # Errors
    ///
    /// Returns a 404 [`ClientError::Api`] for missing tags.
    pub async fn delete_tag(&self, id: Uuid) -> Result<MessageResponse, ClientError> {
        self.delete(&format!("api/tags/{id}")).await
    }

    /// `GET /api/analytics/stats`.
    ///
    /// # Errors
    ///
    /// Returns transport failures and error responses.
    pub async fn network_stats(&self) -> Result<NetworkStats, ClientError> {
        self.get("api/analytics/stats").await
    }

    /// `GET /api/network/graph`.
    ///
    /// # Errors
    ///
    /// Returns transport failures and error responses.
    pub async fn network_graph(&self) -> Result<NetworkGraph, ClientError> {
        self.get("api/network/graph").await
    }
}

/// Trimmed query when it is long enough to send.
pub(crate) fn searchable(query: &str) -> Option<&str> {
    let trimmed = query.trim();
    (trimmed.chars().count() >= MIN_SEARCH_CHARS).then_some(trimmed)
}

async fn checked(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await?;
    Err(ClientError::from_response_body(status, &body))
}
