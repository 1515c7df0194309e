//! Driving port for account registration and login.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::{NewUser, UserProfile};

/// Login credentials as received from the wire.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Login email.
    pub email: String,
    /// Password as received. Compared verbatim against the stored value.
    pub password: String,
}

/// Use-cases exposed by the accounts service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Accounts: Send + Sync {
    /// Register a new account; `Conflict` when the email is taken.
    async fn register(&self, draft: NewUser) -> Result<UserProfile, Error>;

    /// Authenticate; `Unauthorized` on unknown email or wrong password.
    async fn login(&self, credentials: Credentials) -> Result<UserProfile, Error>;
}
