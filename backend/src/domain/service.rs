//! Service listings owned by suppliers.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// Marketplace category a service is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Event organisation and ticketing.
    Events,
    /// Transport and transfers.
    Transportation,
    /// Restaurants and catering.
    Dining,
    /// Hotels and rentals.
    Accommodation,
}

impl Category {
    /// Wire form of the category.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Events => "EVENTS",
            Self::Transportation => "TRANSPORTATION",
            Self::Dining => "DINING",
            Self::Accommodation => "ACCOMMODATION",
        }
    }
}

impl FromStr for Category {
    type Err = ServiceValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "EVENTS" => Ok(Self::Events),
            "TRANSPORTATION" => Ok(Self::Transportation),
            "DINING" => Ok(Self::Dining),
            "ACCOMMODATION" => Ok(Self::Accommodation),
            other => Err(ServiceValidationError::UnknownCategory(other.to_owned())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised by service constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceValidationError {
    /// The title is empty once trimmed.
    #[error("title must not be empty")]
    EmptyTitle,
    /// The description is empty once trimmed.
    #[error("description must not be empty")]
    EmptyDescription,
    /// The category string is not a known category.
    #[error("unknown category: {0}")]
    UnknownCategory(String),
    /// Prices are strictly positive.
    #[error("price must be positive")]
    NonPositivePrice,
}

/// A bookable service listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Stable identifier.
    pub id: Uuid,
    /// Owning supplier.
    pub supplier_id: UserId,
    /// Listing title.
    pub title: String,
    /// Listing description.
    pub description: String,
    /// Marketplace category.
    pub category: Category,
    /// Listed price. Strictly positive.
    #[schema(value_type = String, example = "100.00")]
    pub price: Decimal,
    /// Optional location text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Whether new bookings are accepted.
    pub availability: bool,
    /// Listing creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Draft for creating a listing.
#[derive(Debug, Clone)]
pub struct NewService {
    /// Owning supplier.
    pub supplier_id: UserId,
    /// Listing title. Non-empty.
    pub title: String,
    /// Listing description. Non-empty.
    pub description: String,
    /// Marketplace category.
    pub category: Category,
    /// Listed price. Strictly positive.
    pub price: Decimal,
    /// Optional location text.
    pub location: Option<String>,
}

impl NewService {
    /// Validate field shape before handing the draft to a repository.
    pub fn validate(&self) -> Result<(), ServiceValidationError> {
        if self.title.trim().is_empty() {
            return Err(ServiceValidationError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(ServiceValidationError::EmptyDescription);
        }
        if self.price <= Decimal::ZERO {
            return Err(ServiceValidationError::NonPositivePrice);
        }
        Ok(())
    }
}

/// Listing joined with its supplier summary and review ratings.
///
/// Ratings ride along raw so the average is recomputed on every read; there
/// is no cached aggregate to go stale.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceRecord {
    /// The listing itself.
    pub service: Service,
    /// Supplier display name.
    pub supplier_name: String,
    /// Supplier contact email.
    pub supplier_email: String,
    /// Review ratings for this listing, each in `1..=5`.
    pub ratings: Vec<i16>,
}
