//! Diesel-backed booking repository.
//!
//! The payment transitions run inside a single transaction with the booking
//! row locked `FOR UPDATE`, so concurrent decisions on the same booking
//! serialise and the `PENDING` guard holds under contention.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::ports::{BookingRepository, BookingRepositoryError};
use crate::domain::{
    BookedServiceSummary, Booking, BookingDetails, BookingStatus, ContactSummary, NewBooking,
};

use super::error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{BookingRow, NewBookingRow, ServiceRow, UserRow};
use super::pool::DbPool;
use super::schema::{bookings, services, users};

/// PostgreSQL adapter for the booking port.
#[derive(Clone)]
pub struct DieselBookingRepository {
    pool: DbPool,
}

impl DieselBookingRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> BookingRepositoryError {
    map_diesel_error(
        error,
        BookingRepositoryError::query,
        BookingRepositoryError::connection,
    )
}

// Lets `?` carry raw Diesel failures out of `conn.transaction` closures.
impl From<diesel::result::Error> for BookingRepositoryError {
    fn from(error: diesel::result::Error) -> Self {
        map_error(error)
    }
}

fn domain_booking(row: BookingRow) -> Result<Booking, BookingRepositoryError> {
    row.into_domain().map_err(BookingRepositoryError::query)
}

fn contact(row: &UserRow) -> ContactSummary {
    ContactSummary {
        name: row.name.clone(),
        email: row.email.clone(),
    }
}

/// Join one booking row with its service, supplier, and client.
async fn assemble_details(
    conn: &mut AsyncPgConnection,
    row: BookingRow,
) -> Result<BookingDetails, BookingRepositoryError> {
    let service_row: ServiceRow = services::table
        .find(row.service_id)
        .first(conn)
        .await
        .map_err(map_error)?;
    let supplier: UserRow = users::table
        .find(service_row.supplier_id)
        .first(conn)
        .await
        .map_err(map_error)?;
    let client: UserRow = users::table
        .find(row.client_id)
        .first(conn)
        .await
        .map_err(map_error)?;

    let service = service_row
        .into_domain()
        .map_err(BookingRepositoryError::query)?;
    Ok(BookingDetails {
        booking: domain_booking(row)?,
        service: BookedServiceSummary::from_service(&service, contact(&supplier)),
        client: contact(&client),
    })
}

/// Lock the booking row and require it to still be `PENDING`.
async fn lock_pending(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<BookingRow, BookingRepositoryError> {
    let row: Option<BookingRow> = bookings::table
        .find(id)
        .for_update()
        .first(conn)
        .await
        .optional()?;
    let row = row.ok_or_else(|| BookingRepositoryError::booking_missing(id.to_string()))?;
    if row.status != BookingStatus::Pending.as_str() {
        return Err(BookingRepositoryError::not_pending(
            id.to_string(),
            row.status,
        ));
    }
    Ok(row)
}

#[async_trait]
impl BookingRepository for DieselBookingRepository {
    async fn insert(&self, booking: NewBooking) -> Result<BookingDetails, BookingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingRepositoryError::connection))?;

        let now = Utc::now();
        let row = NewBookingRow {
            id: Uuid::new_v4(),
            service_id: booking.service_id,
            client_id: booking.client_id.as_uuid(),
            booking_date: booking.booking_date,
            notes: booking.notes,
            total_amount: booking.total_amount,
            status: BookingStatus::Pending.as_str().to_owned(),
            payment_verified: false,
            payment_proof: booking.payment_proof,
            created_at: now,
            updated_at: now,
        };

        let inserted: BookingRow = diesel::insert_into(bookings::table)
            .values(&row)
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    BookingRepositoryError::query("booking references a missing row")
                } else {
                    map_error(err)
                }
            })?;

        assemble_details(&mut conn, inserted).await
    }

    async fn find_details(
        &self,
        id: Uuid,
    ) -> Result<Option<BookingDetails>, BookingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingRepositoryError::connection))?;

        let row: Option<BookingRow> = bookings::table
            .find(id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        match row {
            Some(row) => Ok(Some(assemble_details(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<BookingDetails>, BookingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingRepositoryError::connection))?;

        let booking_rows: Vec<BookingRow> = bookings::table
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let service_ids: Vec<Uuid> = booking_rows.iter().map(|row| row.service_id).collect();
        let service_rows: Vec<ServiceRow> = services::table
            .filter(services::id.eq_any(&service_ids))
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        // Suppliers and clients both live in `users`; one fetch covers both.
        let mut user_ids: Vec<Uuid> = booking_rows.iter().map(|row| row.client_id).collect();
        user_ids.extend(service_rows.iter().map(|row| row.supplier_id));
        let user_rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(&user_ids))
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let users_by_id: HashMap<Uuid, UserRow> =
            user_rows.into_iter().map(|row| (row.id, row)).collect();
        let services_by_id: HashMap<Uuid, ServiceRow> =
            service_rows.into_iter().map(|row| (row.id, row)).collect();

        booking_rows
            .into_iter()
            .map(|row| {
                let service_row = services_by_id.get(&row.service_id).ok_or_else(|| {
                    BookingRepositoryError::query("booking references a missing service")
                })?;
                let supplier = users_by_id.get(&service_row.supplier_id).ok_or_else(|| {
                    BookingRepositoryError::supplier_missing(service_row.supplier_id.to_string())
                })?;
                let client = users_by_id.get(&row.client_id).ok_or_else(|| {
                    BookingRepositoryError::query("booking references a missing client")
                })?;

                let service = service_row
                    .clone()
                    .into_domain()
                    .map_err(BookingRepositoryError::query)?;
                Ok(BookingDetails {
                    booking: domain_booking(row)?,
                    service: BookedServiceSummary::from_service(&service, contact(supplier)),
                    client: contact(client),
                })
            })
            .collect()
    }

    async fn verify_payment(
        &self,
        id: Uuid,
        supplier_credit: Decimal,
    ) -> Result<BookingDetails, BookingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingRepositoryError::connection))?;

        conn.transaction(|conn| {
            async move {
                let row = lock_pending(conn, id).await?;

                let supplier_id: Uuid = services::table
                    .find(row.service_id)
                    .select(services::supplier_id)
                    .first(conn)
                    .await?;

                let credited = diesel::update(users::table.find(supplier_id))
                    .set(users::balance.eq(users::balance + supplier_credit))
                    .execute(conn)
                    .await?;
                if credited == 0 {
                    // Error return rolls the whole transition back.
                    return Err(BookingRepositoryError::supplier_missing(
                        supplier_id.to_string(),
                    ));
                }

                let updated: BookingRow = diesel::update(bookings::table.find(id))
                    .set((
                        bookings::status.eq(BookingStatus::Confirmed.as_str()),
                        bookings::payment_verified.eq(true),
                        bookings::updated_at.eq(Utc::now()),
                    ))
                    .get_result(conn)
                    .await?;

                assemble_details(conn, updated).await
            }
            .scope_boxed()
        })
        .await
    }

    async fn reject_payment(
        &self,
        id: Uuid,
        reason: String,
    ) -> Result<BookingDetails, BookingRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, BookingRepositoryError::connection))?;

        conn.transaction(|conn| {
            async move {
                lock_pending(conn, id).await?;

                let updated: BookingRow = diesel::update(bookings::table.find(id))
                    .set((
                        bookings::status.eq(BookingStatus::Cancelled.as_str()),
                        bookings::rejection_reason.eq(reason),
                        bookings::updated_at.eq(Utc::now()),
                    ))
                    .get_result(conn)
                    .await?;

                assemble_details(conn, updated).await
            }
            .scope_boxed()
        })
        .await
    }
}
