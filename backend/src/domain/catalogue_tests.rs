//! Tests for the catalogue service.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::*;
use crate::domain::error::ErrorCode;
use crate::domain::listing::SortKey;
use crate::domain::ports::MockServiceRepository;
use crate::domain::service::{Category, ServiceRecord};
use crate::domain::user::UserId;

fn record(title: &str, price: rust_decimal::Decimal, ratings: Vec<i16>) -> ServiceRecord {
    ServiceRecord {
        service: Service {
            id: Uuid::new_v4(),
            supplier_id: UserId::random(),
            title: title.to_owned(),
            description: "desc".to_owned(),
            category: Category::Dining,
            price,
            location: None,
            availability: true,
            created_at: Utc::now(),
        },
        supplier_name: "Supplier".to_owned(),
        supplier_email: "supplier@x.com".to_owned(),
        ratings,
    }
}

#[tokio::test]
async fn list_aggregates_ratings_per_read() {
    let mut repo = MockServiceRepository::new();
    repo.expect_list().times(1).return_once(|| {
        Ok(vec![
            record("Reviewed", dec!(10), vec![3, 4, 5]),
            record("Unreviewed", dec!(20), vec![]),
        ])
    });

    let service = CatalogueService::new(Arc::new(repo));
    let listings = service
        .list_services(ServiceQuery::default())
        .await
        .expect("listings");

    let by_title = |title: &str| {
        listings
            .iter()
            .find(|l| l.service.title == title)
            .expect("present")
    };
    assert_eq!(by_title("Reviewed").average_rating, dec!(4));
    assert_eq!(by_title("Unreviewed").average_rating, dec!(0));
}

#[tokio::test]
async fn list_applies_sort_specification() {
    let mut repo = MockServiceRepository::new();
    repo.expect_list().times(1).return_once(|| {
        Ok(vec![
            record("Pricey", dec!(90), vec![]),
            record("Cheap", dec!(10), vec![]),
        ])
    });

    let service = CatalogueService::new(Arc::new(repo));
    let listings = service
        .list_services(ServiceQuery {
            sort: Some(SortKey::PriceHigh),
            ..ServiceQuery::default()
        })
        .await
        .expect("listings");

    let titles: Vec<&str> = listings.iter().map(|l| l.service.title.as_str()).collect();
    assert_eq!(titles, vec!["Pricey", "Cheap"]);
}

#[tokio::test]
async fn create_rejects_non_positive_price() {
    let mut repo = MockServiceRepository::new();
    repo.expect_insert().times(0);

    let service = CatalogueService::new(Arc::new(repo));
    let error = service
        .create_service(NewService {
            supplier_id: UserId::random(),
            title: "Free lunch".to_owned(),
            description: "There is none".to_owned(),
            category: Category::Dining,
            price: dec!(0),
            location: None,
        })
        .await
        .expect_err("invalid price");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn create_maps_missing_supplier_to_not_found() {
    let mut repo = MockServiceRepository::new();
    repo.expect_insert()
        .times(1)
        .return_once(|draft| Err(ServiceRepositoryError::supplier_missing(draft.supplier_id.to_string())));

    let service = CatalogueService::new(Arc::new(repo));
    let error = service
        .create_service(NewService {
            supplier_id: UserId::random(),
            title: "Boat trip".to_owned(),
            description: "Half day".to_owned(),
            category: Category::Events,
            price: dec!(60),
            location: None,
        })
        .await
        .expect_err("missing supplier");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
