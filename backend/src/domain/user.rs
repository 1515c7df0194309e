//! User accounts: clients, suppliers, and the platform administrator.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Validation errors raised by user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// The id string is not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// The name is empty once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The email is empty or lacks an `@`.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// The role string is not one of CLIENT, SUPPLIER, ADMIN.
    #[error("unknown role: {0}")]
    UnknownRole(String),
    /// Balances never go negative.
    #[error("balance must not be negative")]
    NegativeBalance,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Wrap an existing UUID.
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse from a string form.
    pub fn parse(raw: &str) -> Result<Self, UserValidationError> {
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Marketplace role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Books services and submits payment proofs.
    Client,
    /// Owns service listings and receives credited balance.
    Supplier,
    /// Verifies or rejects manual payments.
    Admin,
}

impl Role {
    /// Wire form of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "CLIENT",
            Self::Supplier => "SUPPLIER",
            Self::Admin => "ADMIN",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Self::Client
    }
}

impl FromStr for Role {
    type Err = UserValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "CLIENT" => Ok(Self::Client),
            "SUPPLIER" => Ok(Self::Supplier),
            "ADMIN" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered account.
///
/// The stored password never leaves the domain: wire responses use
/// [`UserProfile`]. Balances are mutated only by the payment verification
/// transition crediting a supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Display name shown on listings and posts.
    pub name: String,
    /// Unique login email.
    pub email: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Stored credential. Plaintext by explicit non-goal; compared verbatim.
    pub password: String,
    /// Marketplace role.
    pub role: Role,
    /// Accumulated supplier earnings. Non-negative.
    pub balance: Decimal,
    /// Whether the account passed manual verification.
    pub is_verified: bool,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Password-free projection for wire responses.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role,
            balance: self.balance,
            is_verified: self.is_verified,
            created_at: self.created_at,
        }
    }
}

/// Draft for registering a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Display name. Non-empty.
    pub name: String,
    /// Login email. Unique across accounts.
    pub email: String,
    /// Optional contact phone.
    pub phone: Option<String>,
    /// Credential as received.
    pub password: String,
    /// Role; defaults to [`Role::Client`].
    pub role: Role,
}

impl NewUser {
    /// Validate field shape before handing the draft to a repository.
    pub fn validate(&self) -> Result<(), UserValidationError> {
        if self.name.trim().is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// Public view of an account, excluding the credential.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Optional contact phone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Marketplace role.
    pub role: Role,
    /// Supplier earnings balance.
    #[schema(value_type = String, example = "90.00")]
    pub balance: Decimal,
    /// Manual verification flag.
    pub is_verified: bool,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Name/email summary attached to bookings and listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn draft() -> NewUser {
        NewUser {
            name: "Sara".to_owned(),
            email: "sara@example.com".to_owned(),
            phone: None,
            password: "password123".to_owned(),
            role: Role::Client,
        }
    }

    #[rstest]
    fn valid_draft_passes() {
        draft().validate().expect("valid draft");
    }

    #[rstest]
    #[case("", UserValidationError::EmptyName)]
    #[case("   ", UserValidationError::EmptyName)]
    fn empty_name_rejected(#[case] name: &str, #[case] expected: UserValidationError) {
        let mut user = draft();
        user.name = name.to_owned();
        assert_eq!(user.validate(), Err(expected));
    }

    #[rstest]
    fn mail_without_at_rejected() {
        let mut user = draft();
        user.email = "not-an-email".to_owned();
        assert_eq!(user.validate(), Err(UserValidationError::InvalidEmail));
    }

    #[rstest]
    #[case("CLIENT", Role::Client)]
    #[case("SUPPLIER", Role::Supplier)]
    #[case("ADMIN", Role::Admin)]
    fn role_parses_wire_form(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("known role"), expected);
    }

    #[rstest]
    fn unknown_role_is_an_error() {
        assert!("client".parse::<Role>().is_err());
    }

    #[rstest]
    fn profile_excludes_password() {
        let user = User {
            id: UserId::random(),
            name: "Sara".to_owned(),
            email: "sara@example.com".to_owned(),
            phone: None,
            password: "secret".to_owned(),
            role: Role::Supplier,
            balance: Decimal::ZERO,
            is_verified: false,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(user.profile()).expect("serializable");
        assert!(value.get("password").is_none());
    }
}
