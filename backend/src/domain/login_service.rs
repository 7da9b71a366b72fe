//! Password login backed by stored argon2 hashes.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::{Error, LoginCredentials, User, verify_password};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// [`LoginService`] that checks credentials against a [`UserRepository`].
///
/// Unknown usernames and wrong passwords produce the same error.
#[derive(Clone)]
pub struct PasswordLoginService<R> {
    users: Arc<R>,
}

impl<R> PasswordLoginService<R> {
    /// Create a service over the given user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> LoginService for PasswordLoginService<R>
where
    R: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(stored) = self.users.find_by_username(credentials.username()).await? else {
            info!(username = credentials.username(), "login rejected: unknown user");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches =
            verify_password(credentials.password(), &stored.password_hash).map_err(|err| {
                error!(user_id = %stored.user.id, error = %err, "stored password hash unusable");
                Error::internal("Internal server error")
            })?;
        if !matches {
            info!(user_id = %stored.user.id, "login rejected: wrong password");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        Ok(stored.user)
    }
}
