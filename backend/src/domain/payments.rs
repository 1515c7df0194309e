//! Payment verification: the one real state machine in the system.
//!
//! A booking's payment lifecycle is `PENDING → VERIFIED | REJECTED`.
//! Both outcomes are terminal. Verification moves (simulated) money, so the
//! terminal-state guard is a correctness requirement, not a UI nicety: the
//! supplier must be credited exactly once per booking.

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use super::booking::{BookingDetails, BookingStatus};
use super::booking_service::map_booking_repository_error;
use super::error::Error;
use super::ports::{BookingRepository, Payments};

/// Fixed fraction of each verified payment retained by the platform.
pub const COMMISSION_RATE: Decimal = dec!(0.10);

/// Payment method label shown on verification views. Manual transfers are
/// the only supported channel.
pub const MANUAL_PAYMENT_METHOD: &str = "Vodafone Cash";

/// What the supplier receives when a payment of `total_amount` is verified.
pub fn supplier_credit(total_amount: Decimal) -> Decimal {
    total_amount * (Decimal::ONE - COMMISSION_RATE)
}

/// Admin decision on a pending payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentAction {
    /// Accept the proof: confirm the booking and credit the supplier.
    Verify,
    /// Refuse the proof with a non-empty reason; cancels the booking.
    Reject {
        /// Why the proof was refused.
        reason: String,
    },
}

impl PaymentAction {
    /// Parse the wire form (`action` plus optional `reason`). Rejections
    /// must carry a non-empty reason.
    pub fn parse(action: &str, reason: Option<String>) -> Result<Self, Error> {
        match action {
            "verify" => Ok(Self::Verify),
            "reject" => {
                let reason = reason
                    .map(|r| r.trim().to_owned())
                    .filter(|r| !r.is_empty())
                    .ok_or_else(|| {
                        Error::invalid_request("rejecting a payment requires a reason")
                    })?;
                Ok(Self::Reject { reason })
            }
            other => Err(Error::invalid_request(format!(
                "action must be verify or reject, got {other}"
            ))),
        }
    }
}

/// Status of a payment verification view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Proof uploaded, awaiting a decision.
    Pending,
    /// Proof accepted; supplier credited.
    Verified,
    /// Proof refused with a reason.
    Rejected,
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "VERIFIED" => Ok(Self::Verified),
            "REJECTED" => Ok(Self::Rejected),
            other => Err(format!("unknown payment status: {other}")),
        }
    }
}

/// Verification view derived from a booking that carries a payment proof.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentView {
    /// View id (the booking id; there is no separate payment table).
    pub id: Uuid,
    /// Underlying booking.
    pub booking_id: Uuid,
    /// Paying client's name.
    pub client_name: String,
    /// Paying client's email.
    pub client_email: String,
    /// Booked service title.
    pub service_title: String,
    /// Amount the proof should evidence.
    #[schema(value_type = String, example = "100.00")]
    pub amount: Decimal,
    /// Payment channel label.
    pub payment_method: &'static str,
    /// Opaque reference to the uploaded proof.
    pub proof_image: String,
    /// When the proof was last touched.
    pub uploaded_at: DateTime<Utc>,
    /// Derived verification status.
    pub status: PaymentStatus,
    /// Who verified, when verified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_by: Option<String>,
    /// When the verification happened.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
    /// Why the proof was refused, when rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

fn view_status(details: &BookingDetails) -> PaymentStatus {
    if details.booking.payment_verified {
        PaymentStatus::Verified
    } else if details.booking.status == BookingStatus::Cancelled {
        PaymentStatus::Rejected
    } else {
        PaymentStatus::Pending
    }
}

fn project_view(details: &BookingDetails, proof: String) -> PaymentView {
    let status = view_status(details);
    PaymentView {
        id: details.booking.id,
        booking_id: details.booking.id,
        client_name: details.client.name.clone(),
        client_email: details.client.email.clone(),
        service_title: details.service.title.clone(),
        amount: details.booking.total_amount,
        payment_method: MANUAL_PAYMENT_METHOD,
        proof_image: proof,
        uploaded_at: details.booking.updated_at,
        status,
        verified_by: (status == PaymentStatus::Verified).then(|| "Admin".to_owned()),
        verified_at: (status == PaymentStatus::Verified).then(|| details.booking.updated_at),
        rejection_reason: details.booking.rejection_reason.clone(),
    }
}

/// Payment verification service over the booking repository port.
#[derive(Clone)]
pub struct PaymentService<B> {
    bookings: Arc<B>,
}

impl<B> PaymentService<B> {
    /// Create the service with its repository.
    pub fn new(bookings: Arc<B>) -> Self {
        Self { bookings }
    }
}

#[async_trait]
impl<B> Payments for PaymentService<B>
where
    B: BookingRepository,
{
    async fn decide(
        &self,
        booking_id: Uuid,
        action: PaymentAction,
    ) -> Result<BookingDetails, Error> {
        // The repository enforces the PENDING guard and atomicity; this
        // read only resolves the amount the commission applies to (it is
        // immutable after creation) and gives unknown ids a clean 404.
        let current = self
            .bookings
            .find_details(booking_id)
            .await
            .map_err(map_booking_repository_error)?
            .ok_or_else(|| Error::not_found(format!("booking {booking_id} does not exist")))?;

        let updated = match action {
            PaymentAction::Verify => {
                let credit = supplier_credit(current.booking.total_amount);
                let details = self
                    .bookings
                    .verify_payment(booking_id, credit)
                    .await
                    .map_err(map_booking_repository_error)?;
                info!(
                    booking_id = %booking_id,
                    supplier_id = %details.service.supplier_id,
                    credit = %credit,
                    "payment verified, supplier credited"
                );
                details
            }
            PaymentAction::Reject { reason } => {
                let details = self
                    .bookings
                    .reject_payment(booking_id, reason)
                    .await
                    .map_err(map_booking_repository_error)?;
                info!(booking_id = %booking_id, "payment rejected");
                details
            }
        };
        Ok(updated)
    }

    async fn list_payments(
        &self,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<PaymentView>, Error> {
        let bookings = self
            .bookings
            .list()
            .await
            .map_err(map_booking_repository_error)?;

        let mut views: Vec<PaymentView> = bookings
            .iter()
            .filter_map(|details| {
                details
                    .booking
                    .payment_proof
                    .clone()
                    .map(|proof| project_view(details, proof))
            })
            .filter(|view| status.is_none_or(|wanted| view.status == wanted))
            .collect();
        views.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(views)
    }
}

#[cfg(test)]
#[path = "payments_tests.rs"]
mod tests;
