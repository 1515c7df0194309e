//! Port for booking persistence and the guarded payment transition.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::booking::{BookingDetails, NewBooking};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by booking repository adapters.
    pub enum BookingRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "booking repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "booking repository query failed: {message}",
        /// The booking does not exist.
        BookingMissing { id: String } => "booking {id} does not exist",
        /// The booking already left `PENDING`; terminal states are final.
        NotPending { id: String, status: String } =>
            "booking {id} is {status}, not PENDING",
        /// The supplier to credit does not exist; the transition rolled back.
        SupplierMissing { id: String } => "supplier {id} does not exist",
    }
}

/// Port for booking writes and reads.
///
/// The two payment operations carry the load-bearing invariant: each must
/// run as one atomic unit with the booking row held exclusively, so two
/// concurrent decisions on the same `PENDING` booking cannot both pass the
/// guard. A decision on a non-`PENDING` booking fails with
/// [`BookingRepositoryError::NotPending`]; it never re-applies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persist a new booking as `PENDING`, returning it with service
    /// (including supplier contact) and client attached.
    async fn insert(&self, booking: NewBooking) -> Result<BookingDetails, BookingRepositoryError>;

    /// Look up a booking with its joined details.
    async fn find_details(
        &self,
        id: Uuid,
    ) -> Result<Option<BookingDetails>, BookingRepositoryError>;

    /// Read all bookings with joined details. Filtering happens in memory
    /// above this port.
    async fn list(&self) -> Result<Vec<BookingDetails>, BookingRepositoryError>;

    /// Atomically verify the payment: set status `CONFIRMED`, mark the
    /// payment verified, and credit the owning supplier with
    /// `supplier_credit` — all in one transaction. A missing supplier rolls
    /// the whole transition back.
    async fn verify_payment(
        &self,
        id: Uuid,
        supplier_credit: Decimal,
    ) -> Result<BookingDetails, BookingRepositoryError>;

    /// Atomically reject the payment: set status `CANCELLED` and record the
    /// reason. The payment stays unverified and no balance moves.
    async fn reject_payment(
        &self,
        id: Uuid,
        reason: String,
    ) -> Result<BookingDetails, BookingRepositoryError>;
}
