//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ContactsCommand, ContactsQuery, InteractionsCommand, InteractionsQuery, LoginService,
    NetworkQuery, RelationshipsCommand, RelationshipsQuery, TagsCommand, TagsQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```no_run
/// use std::sync::Arc;
///
/// use backend::domain::{
///     AnalyticsService, ContactService, InteractionService, PasswordLoginService,
///     RelationshipService, TagService,
/// };
/// use backend::inbound::http::state::HttpState;
/// use backend::outbound::persistence::{
///     DbPool, DieselContactRepository, DieselInteractionRepository,
///     DieselNetworkAnalyticsRepository, DieselRelationshipRepository, DieselTagRepository,
///     DieselUserRepository,
/// };
/// use mockable::DefaultClock;
///
/// fn build(pool: DbPool) -> HttpState {
///     let clock = Arc::new(DefaultClock);
///     let contacts = Arc::new(ContactService::new(
///         Arc::new(DieselContactRepository::new(pool.clone())),
///         clock.clone(),
///     ));
///     let interactions = Arc::new(InteractionService::new(
///         Arc::new(DieselInteractionRepository::new(pool.clone())),
///         clock.clone(),
///     ));
///     let relationships = Arc::new(RelationshipService::new(
///         Arc::new(DieselRelationshipRepository::new(pool.clone())),
///         clock.clone(),
///     ));
///     let tags = Arc::new(TagService::new(
///         Arc::new(DieselTagRepository::new(pool.clone())),
///         clock.clone(),
///     ));
///     let network = Arc::new(AnalyticsService::new(
///         Arc::new(DieselNetworkAnalyticsRepository::new(pool.clone())),
///         clock,
///     ));
///     HttpState {
///         login: Arc::new(PasswordLoginService::new(Arc::new(DieselUserRepository::new(pool)))),
///         contacts: contacts.clone(),
///         contacts_query: contacts,
///         interactions: interactions.clone(),
///         interactions_query: interactions,
///         relationships: relationships.clone(),
///         relationships_query: relationships,
///         tags: tags.clone(),
///         tags_query: tags,
///         network,
///     }
/// }
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub contacts: Arc<dyn ContactsCommand>,
    pub contacts_query: Arc<dyn ContactsQuery>,
    pub interactions: Arc<dyn InteractionsCommand>,
    pub interactions_query: Arc<dyn InteractionsQuery>,
    pub relationships: Arc<dyn RelationshipsCommand>,
    pub relationships_query: Arc<dyn RelationshipsQuery>,
    pub tags: Arc<dyn TagsCommand>,
    pub tags_query: Arc<dyn TagsQuery>,
    pub network: Arc<dyn NetworkQuery>,
}
