//! Tests for the booking service.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::*;
use crate::domain::booking::{BookedServiceSummary, Booking, BookingStatus};
use crate::domain::error::ErrorCode;
use crate::domain::ports::{MockBookingRepository, MockServiceRepository};
use crate::domain::service::{Category, Service};
use crate::domain::user::{ContactSummary, UserId};

fn listed_service(availability: bool) -> Service {
    Service {
        id: Uuid::new_v4(),
        supplier_id: UserId::random(),
        title: "Nile dinner cruise".to_owned(),
        description: "Two hours with live music".to_owned(),
        category: Category::Dining,
        price: dec!(100),
        location: Some("Cairo".to_owned()),
        availability,
        created_at: Utc::now(),
    }
}

fn draft_for(service: &Service) -> NewBooking {
    NewBooking {
        service_id: service.id,
        client_id: UserId::random(),
        booking_date: None,
        notes: Some("window seat".to_owned()),
        total_amount: dec!(100),
        payment_proof: None,
    }
}

pub(crate) fn details_from(draft: &NewBooking, service: &Service) -> BookingDetails {
    let now = Utc::now();
    BookingDetails {
        booking: Booking {
            id: Uuid::new_v4(),
            service_id: draft.service_id,
            client_id: draft.client_id,
            booking_date: draft.booking_date,
            notes: draft.notes.clone(),
            total_amount: draft.total_amount,
            status: BookingStatus::Pending,
            payment_verified: false,
            payment_proof: draft.payment_proof.clone(),
            rejection_reason: None,
            created_at: now,
            updated_at: now,
        },
        service: BookedServiceSummary::from_service(
            service,
            ContactSummary {
                name: "Supplier".to_owned(),
                email: "supplier@x.com".to_owned(),
            },
        ),
        client: ContactSummary {
            name: "Client".to_owned(),
            email: "client@x.com".to_owned(),
        },
    }
}

#[tokio::test]
async fn create_booking_persists_pending_with_details() {
    let service = listed_service(true);
    let draft = draft_for(&service);
    let expected = details_from(&draft, &service);

    let mut services = MockServiceRepository::new();
    let lookup = service.clone();
    services
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(lookup)));

    let mut bookings = MockBookingRepository::new();
    let inserted = expected.clone();
    bookings
        .expect_insert()
        .times(1)
        .return_once(move |_| Ok(inserted));

    let manager = BookingService::new(Arc::new(bookings), Arc::new(services));
    let details = manager.create_booking(draft).await.expect("created");

    assert_eq!(details.booking.status, BookingStatus::Pending);
    assert!(!details.booking.payment_verified);
    assert_eq!(details.service.supplier.email, "supplier@x.com");
    assert_eq!(details.client.name, "Client");
}

#[tokio::test]
async fn unavailable_service_always_rejects_bookings() {
    let service = listed_service(false);
    let draft = draft_for(&service);

    let mut services = MockServiceRepository::new();
    services
        .expect_find_by_id()
        .times(1)
        .return_once(move |_| Ok(Some(service)));

    let mut bookings = MockBookingRepository::new();
    bookings.expect_insert().times(0);

    let manager = BookingService::new(Arc::new(bookings), Arc::new(services));
    let error = manager.create_booking(draft).await.expect_err("unavailable");

    assert_eq!(error.code(), ErrorCode::Unavailable);
}

#[tokio::test]
async fn unknown_service_is_not_found() {
    let mut services = MockServiceRepository::new();
    services.expect_find_by_id().times(1).return_once(|_| Ok(None));

    let mut bookings = MockBookingRepository::new();
    bookings.expect_insert().times(0);

    let manager = BookingService::new(Arc::new(bookings), Arc::new(services));
    let error = manager
        .create_booking(NewBooking {
            service_id: Uuid::new_v4(),
            client_id: UserId::random(),
            booking_date: None,
            notes: None,
            total_amount: dec!(50),
            payment_proof: None,
        })
        .await
        .expect_err("missing service");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn non_positive_amount_fails_before_any_lookup() {
    let mut services = MockServiceRepository::new();
    services.expect_find_by_id().times(0);
    let mut bookings = MockBookingRepository::new();
    bookings.expect_insert().times(0);

    let manager = BookingService::new(Arc::new(bookings), Arc::new(services));
    let error = manager
        .create_booking(NewBooking {
            service_id: Uuid::new_v4(),
            client_id: UserId::random(),
            booking_date: None,
            notes: None,
            total_amount: dec!(-1),
            payment_proof: None,
        })
        .await
        .expect_err("negative amount");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn list_filters_by_client_supplier_and_status() {
    let service = listed_service(true);
    let matching = details_from(&draft_for(&service), &service);
    let client_id = matching.booking.client_id;
    let supplier_id = matching.service.supplier_id;

    let other_service = listed_service(true);
    let other = details_from(&draft_for(&other_service), &other_service);

    let mut bookings = MockBookingRepository::new();
    let rows = vec![matching.clone(), other];
    bookings.expect_list().times(1).return_once(move || Ok(rows));

    let manager = BookingService::new(Arc::new(bookings), Arc::new(MockServiceRepository::new()));
    let listed = manager
        .list_bookings(BookingFilter {
            client_id: Some(client_id),
            supplier_id: Some(supplier_id),
            status: Some(BookingStatus::Pending),
        })
        .await
        .expect("listed");

    assert_eq!(listed.len(), 1);
    assert_eq!(
        listed.first().map(|d| d.booking.id),
        Some(matching.booking.id)
    );
}

#[tokio::test]
async fn list_orders_newest_first() {
    let service = listed_service(true);
    let mut older = details_from(&draft_for(&service), &service);
    older.booking.created_at = Utc::now() - chrono::Duration::hours(1);
    let newer = details_from(&draft_for(&service), &service);
    let (older_id, newer_id) = (older.booking.id, newer.booking.id);

    let mut bookings = MockBookingRepository::new();
    let rows = vec![older, newer];
    bookings.expect_list().times(1).return_once(move || Ok(rows));

    let manager = BookingService::new(Arc::new(bookings), Arc::new(MockServiceRepository::new()));
    let listed = manager
        .list_bookings(BookingFilter::default())
        .await
        .expect("listed");

    let ids: Vec<Uuid> = listed.iter().map(|d| d.booking.id).collect();
    assert_eq!(ids, vec![newer_id, older_id]);
}
