//! Bookings and the payment verification lifecycle.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::service::{Category, Service};
use super::user::{ContactSummary, UserId};

/// Lifecycle status of a booking.
///
/// `Pending` is the only state that admits a payment decision. `Confirmed`
/// and `Cancelled` are terminal: once reached, no further transition is
/// permitted, which is what makes the supplier credit exactly-once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Awaiting a payment decision.
    Pending,
    /// Payment verified; supplier credited.
    Confirmed,
    /// Payment rejected or booking withdrawn.
    Cancelled,
    /// Service delivered.
    Completed,
}

impl BookingStatus {
    /// Wire form of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Cancelled => "CANCELLED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Whether a payment decision may still be applied.
    pub const fn accepts_payment_decision(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "PENDING" => Ok(Self::Pending),
            "CONFIRMED" => Ok(Self::Confirmed),
            "CANCELLED" => Ok(Self::Cancelled),
            "COMPLETED" => Ok(Self::Completed),
            other => Err(format!("unknown booking status: {other}")),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A client's booking of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Stable identifier.
    pub id: Uuid,
    /// Booked service.
    pub service_id: Uuid,
    /// Booking client.
    pub client_id: UserId,
    /// Requested date, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking_date: Option<DateTime<Utc>>,
    /// Free-form notes from the client.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Agreed amount. Strictly positive, independent of the listed price.
    #[schema(value_type = String, example = "100.00")]
    pub total_amount: Decimal,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Set exactly once, when the payment is verified.
    pub payment_verified: bool,
    /// Opaque reference to an uploaded payment proof.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_proof: Option<String>,
    /// Admin-supplied reason when the payment was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Draft for creating a booking. Always persisted as `PENDING`.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Booked service.
    pub service_id: Uuid,
    /// Booking client.
    pub client_id: UserId,
    /// Requested date, if any.
    pub booking_date: Option<DateTime<Utc>>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Agreed amount. Strictly positive.
    pub total_amount: Decimal,
    /// Opaque reference to the payment proof, when submitted up front.
    pub payment_proof: Option<String>,
}

/// Summary of the booked service carried on booking reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookedServiceSummary {
    /// Service identifier.
    pub id: Uuid,
    /// Listing title.
    pub title: String,
    /// Marketplace category.
    pub category: Category,
    /// Listed price.
    #[schema(value_type = String, example = "100.00")]
    pub price: Decimal,
    /// Owning supplier id.
    pub supplier_id: UserId,
    /// Supplier name and email.
    pub supplier: ContactSummary,
}

impl BookedServiceSummary {
    /// Build a summary from a full listing plus supplier contact details.
    pub fn from_service(service: &Service, supplier: ContactSummary) -> Self {
        Self {
            id: service.id,
            title: service.title.clone(),
            category: service.category,
            price: service.price,
            supplier_id: service.supplier_id,
            supplier,
        }
    }
}

/// Booking with its service (including supplier contact) and client attached.
///
/// This is the shape every booking read returns, mirroring the eager joins
/// the API promises.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetails {
    /// The booking record.
    #[serde(flatten)]
    pub booking: Booking,
    /// Booked service with supplier contact.
    pub service: BookedServiceSummary,
    /// Client name and email.
    pub client: ContactSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BookingStatus::Pending, true)]
    #[case(BookingStatus::Confirmed, false)]
    #[case(BookingStatus::Cancelled, false)]
    #[case(BookingStatus::Completed, false)]
    fn only_pending_accepts_decisions(
        #[case] status: BookingStatus,
        #[case] expected: bool,
    ) {
        assert_eq!(status.accepts_payment_decision(), expected);
    }

    #[rstest]
    fn status_round_trips_wire_form() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            assert_eq!(
                status.as_str().parse::<BookingStatus>().expect("round trip"),
                status
            );
        }
    }
}
