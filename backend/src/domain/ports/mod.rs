//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by persistence adapters.
//! Driving ports (`*Command`, `*Query`, [`LoginService`]) are implemented by
//! domain services and called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod contact_repository;
mod contacts_command;
mod contacts_query;
mod demo_network_repository;
mod interaction_repository;
mod interactions_command;
mod interactions_query;
mod login_service;
mod network_analytics_repository;
mod network_query;
mod relationship_repository;
mod relationships_command;
mod relationships_query;
mod tag_repository;
mod tags_command;
mod tags_query;
mod user_repository;

#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
#[cfg(test)]
pub use contacts_command::MockContactsCommand;
pub use contacts_command::ContactsCommand;
#[cfg(test)]
pub use contacts_query::MockContactsQuery;
pub use contacts_query::ContactsQuery;
#[cfg(test)]
pub use demo_network_repository::MockDemoNetworkRepository;
pub use demo_network_repository::{
    DemoNetworkRepository, DemoNetworkRepositoryError, DemoNetworkSeedRequest, SeedingResult,
};
#[cfg(test)]
pub use interaction_repository::MockInteractionRepository;
pub use interaction_repository::{InteractionRepository, InteractionRepositoryError};
#[cfg(test)]
pub use interactions_command::MockInteractionsCommand;
pub use interactions_command::InteractionsCommand;
#[cfg(test)]
pub use interactions_query::MockInteractionsQuery;
pub use interactions_query::InteractionsQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use network_analytics_repository::MockNetworkAnalyticsRepository;
pub use network_analytics_repository::{
    NetworkAnalyticsRepository, NetworkAnalyticsRepositoryError,
};
#[cfg(test)]
pub use network_query::MockNetworkQuery;
pub use network_query::NetworkQuery;
#[cfg(test)]
pub use relationship_repository::MockRelationshipRepository;
pub use relationship_repository::{RelationshipRepository, RelationshipRepositoryError};
#[cfg(test)]
pub use relationships_command::MockRelationshipsCommand;
pub use relationships_command::RelationshipsCommand;
#[cfg(test)]
pub use relationships_query::MockRelationshipsQuery;
pub use relationships_query::RelationshipsQuery;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
pub use tag_repository::{TagRepository, TagRepositoryError};
#[cfg(test)]
pub use tags_command::MockTagsCommand;
pub use tags_command::TagsCommand;
#[cfg(test)]
pub use tags_query::MockTagsQuery;
pub use tags_query::TagsQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
