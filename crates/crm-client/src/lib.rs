//! Client data layer for the personal CRM API.
//!
//! [`ApiClient`] wraps every REST route in a typed async method and keeps the
//! session cookie between calls. [`QueryCache`] sits in front of the read
//! routes: concurrent reads of one [`QueryKey`] share a single request, and
//! each [`Mutation`] declares which cached reads it makes stale.
//! [`CrmStore`] joins the two so callers read through the cache and write
//! through mutations.

mod api;
mod cache;
mod error;
mod model;
mod query;
mod store;

pub use api::{ApiClient, MIN_SEARCH_CHARS};
pub use cache::{QueryCache, QueryState};
pub use error::{ApiErrorBody, ClientError};
pub use model::{
    Contact, ContactDetails, ContactUpdate, GraphLink, GraphNode, Interaction,
    InteractionUpdate, InteractionWithContact, MessageResponse, NetworkGraph, NetworkStats,
    NewContact, NewInteraction, NewRelationship, NewTag, Relationship, Tag, User,
};
pub use query::{Invalidation, Mutation, QueryFamily, QueryKey};
pub use store::CrmStore;
