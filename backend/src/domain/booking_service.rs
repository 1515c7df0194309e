//! Booking manager: creation against availability, filtered listing.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::info;

use super::booking::{BookingDetails, NewBooking};
use super::error::Error;
use super::ports::{
    BookingFilter, BookingRepository, BookingRepositoryError, Bookings, ServiceRepository,
    ServiceRepositoryError,
};

pub(crate) fn map_booking_repository_error(error: BookingRepositoryError) -> Error {
    match error {
        BookingRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("booking repository unavailable: {message}"))
        }
        BookingRepositoryError::Query { message } => {
            Error::internal(format!("booking repository error: {message}"))
        }
        BookingRepositoryError::BookingMissing { id } => {
            Error::not_found(format!("booking {id} does not exist"))
        }
        BookingRepositoryError::NotPending { id, status } => Error::invalid_state(format!(
            "booking {id} is {status}; payment decisions apply to PENDING bookings only"
        )),
        BookingRepositoryError::SupplierMissing { id } => {
            Error::internal(format!("supplier {id} missing while crediting balance"))
        }
    }
}

fn map_service_repository_error(error: ServiceRepositoryError) -> Error {
    match error {
        ServiceRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("service repository unavailable: {message}"))
        }
        ServiceRepositoryError::Query { message } => {
            Error::internal(format!("service repository error: {message}"))
        }
        ServiceRepositoryError::SupplierMissing { id } => {
            Error::not_found(format!("supplier {id} does not exist"))
        }
    }
}

/// Booking service over the booking and service repository ports.
#[derive(Clone)]
pub struct BookingService<B, S> {
    bookings: Arc<B>,
    services: Arc<S>,
}

impl<B, S> BookingService<B, S> {
    /// Create the service with its repositories.
    pub fn new(bookings: Arc<B>, services: Arc<S>) -> Self {
        Self { bookings, services }
    }
}

#[async_trait]
impl<B, S> Bookings for BookingService<B, S>
where
    B: BookingRepository,
    S: ServiceRepository,
{
    async fn create_booking(&self, draft: NewBooking) -> Result<BookingDetails, Error> {
        if draft.total_amount <= Decimal::ZERO {
            return Err(Error::invalid_request(
                "totalAmount must be a positive amount",
            ));
        }

        let service = self
            .services
            .find_by_id(draft.service_id)
            .await
            .map_err(map_service_repository_error)?
            .ok_or_else(|| {
                Error::not_found(format!("service {} does not exist", draft.service_id))
            })?;

        // Availability gates new bookings; existing bookings are unaffected.
        if !service.availability {
            return Err(Error::unavailable(format!(
                "service {} is not accepting bookings",
                service.id
            )));
        }

        let details = self
            .bookings
            .insert(draft)
            .await
            .map_err(map_booking_repository_error)?;
        info!(
            booking_id = %details.booking.id,
            service_id = %details.booking.service_id,
            amount = %details.booking.total_amount,
            "booking created"
        );
        Ok(details)
    }

    async fn list_bookings(&self, filter: BookingFilter) -> Result<Vec<BookingDetails>, Error> {
        let mut bookings = self
            .bookings
            .list()
            .await
            .map_err(map_booking_repository_error)?;

        if let Some(client_id) = filter.client_id {
            bookings.retain(|details| details.booking.client_id == client_id);
        }
        if let Some(supplier_id) = filter.supplier_id {
            bookings.retain(|details| details.service.supplier_id == supplier_id);
        }
        if let Some(status) = filter.status {
            bookings.retain(|details| details.booking.status == status);
        }

        bookings.sort_by(|a, b| b.booking.created_at.cmp(&a.booking.created_at));
        Ok(bookings)
    }
}

#[cfg(test)]
#[path = "booking_service_tests.rs"]
mod tests;
