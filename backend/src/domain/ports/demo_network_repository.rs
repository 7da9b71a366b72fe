//! Port abstraction for applying a generated demo network.
//!
//! Adapters insert the demo account and everything it owns in one
//! transaction, and skip the whole request when the username already exists.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Contact, Interaction, Relationship, StoredUser, Tag};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised while applying a demo network.
    pub enum DemoNetworkRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "demo network seeding connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "demo network seeding query failed: {message}" as InternalError,
    }
}

/// Outcome of a seeding attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedingResult {
    /// Rows were inserted.
    Applied,
    /// The demo user already existed; nothing was written.
    AlreadySeeded,
}

/// Fully materialised rows for one demo account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoNetworkSeedRequest {
    /// Account owning every other row.
    pub user: StoredUser,
    pub contacts: Vec<Contact>,
    pub interactions: Vec<Interaction>,
    pub relationships: Vec<Relationship>,
    pub tags: Vec<Tag>,
    /// `(contact_id, tag_id)` pairs.
    pub contact_tags: Vec<(Uuid, Uuid)>,
}

/// Port for inserting a demo network atomically.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DemoNetworkRepository: Send + Sync {
    /// Insert every row, or report `AlreadySeeded` when the username exists.
    async fn seed(
        &self,
        request: &DemoNetworkSeedRequest,
    ) -> Result<SeedingResult, DemoNetworkRepositoryError>;
}
