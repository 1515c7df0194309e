//! Account registration and login.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::error::Error;
use super::ports::{Accounts, Credentials, UserRepository, UserRepositoryError};
use super::user::{NewUser, UserProfile};

fn map_repository_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { email } => {
            Error::conflict(format!("email already registered: {email}"))
        }
    }
}

/// Account service over the user repository port.
#[derive(Clone)]
pub struct AccountService<R> {
    users: Arc<R>,
}

impl<R> AccountService<R> {
    /// Create the service with its repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R> Accounts for AccountService<R>
where
    R: UserRepository,
{
    async fn register(&self, draft: NewUser) -> Result<UserProfile, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        // The uniqueness race belongs to the repository: it maps a unique
        // violation to DuplicateEmail, so no check-then-insert gap exists.
        let user = self
            .users
            .insert(draft)
            .await
            .map_err(map_repository_error)?;
        info!(user_id = %user.id, role = %user.role, "account registered");
        Ok(user.profile())
    }

    async fn login(&self, credentials: Credentials) -> Result<UserProfile, Error> {
        let user = self
            .users
            .find_by_email(&credentials.email)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;

        // Plaintext comparison; credential hardening is an explicit non-goal.
        if user.password != credentials.password {
            return Err(Error::unauthorized("invalid credentials"));
        }
        info!(user_id = %user.id, "login succeeded");
        Ok(user.profile())
    }
}

#[cfg(test)]
#[path = "accounts_tests.rs"]
mod tests;
