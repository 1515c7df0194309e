//! Driving port for booking creation and listing.

use async_trait::async_trait;

use crate::domain::booking::{BookingDetails, BookingStatus, NewBooking};
use crate::domain::error::Error;
use crate::domain::user::UserId;

/// In-memory filter over booking reads. All axes are optional conjuncts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingFilter {
    /// Keep bookings made by this client.
    pub client_id: Option<UserId>,
    /// Keep bookings whose service belongs to this supplier.
    pub supplier_id: Option<UserId>,
    /// Keep bookings in this status; `None` (the `all` sentinel) keeps all.
    pub status: Option<BookingStatus>,
}

/// Use-cases exposed by the booking manager.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Bookings: Send + Sync {
    /// Create a booking against an available service. Fails `NotFound` for
    /// an unknown service, `Unavailable` when bookings are closed, and
    /// `InvalidRequest` for a non-positive amount.
    async fn create_booking(&self, draft: NewBooking) -> Result<BookingDetails, Error>;

    /// List bookings, newest first, filtered in memory.
    async fn list_bookings(&self, filter: BookingFilter) -> Result<Vec<BookingDetails>, Error>;
}
