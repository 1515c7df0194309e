//! Driving port for payment verification.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::booking::BookingDetails;
use crate::domain::error::Error;
use crate::domain::payments::{PaymentAction, PaymentStatus, PaymentView};

/// Use-cases exposed by the payment verification service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Payments: Send + Sync {
    /// Apply an admin decision to a `PENDING` booking. Verification credits
    /// the supplier exactly once; any repeat decision fails `InvalidState`.
    async fn decide(
        &self,
        booking_id: Uuid,
        action: PaymentAction,
    ) -> Result<BookingDetails, Error>;

    /// Project bookings carrying a payment proof into verification views,
    /// newest first, optionally filtered by view status.
    async fn list_payments(
        &self,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<PaymentView>, Error>;
}
