//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::StoredUser;

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}" as InternalError,
        /// The username is already taken.
        DuplicateUsername { username: String } => "username {username:?} is already taken" as Conflict,
    }
}

/// Port for account lookups used by login and seeding.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user and password hash by login name.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoredUser>, UserPersistenceError>;

    /// Insert a new account.
    async fn insert(&self, user: &StoredUser) -> Result<(), UserPersistenceError>;
}
