//! Port for account persistence adapters.

use async_trait::async_trait;

use crate::domain::user::{NewUser, User, UserId};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The email is already registered. Emails are unique.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Port for creating and looking up accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new account. Fails with [`UserRepositoryError::DuplicateEmail`]
    /// when the email is taken; the uniqueness check and the insert must be
    /// atomic in the adapter.
    async fn insert(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    /// Look up an account by login email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;
}
