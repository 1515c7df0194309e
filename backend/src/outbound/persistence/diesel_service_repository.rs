//! Diesel-backed service listing repository.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ServiceRepository, ServiceRepositoryError};
use crate::domain::{NewService, Service, ServiceRecord};

use super::error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{NewServiceRow, ReviewRatingRow, ServiceRow};
use super::pool::DbPool;
use super::schema::{reviews, services, users};

/// PostgreSQL adapter for the service listing port.
#[derive(Clone)]
pub struct DieselServiceRepository {
    pool: DbPool,
}

impl DieselServiceRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> ServiceRepositoryError {
    map_diesel_error(
        error,
        ServiceRepositoryError::query,
        ServiceRepositoryError::connection,
    )
}

fn domain_service(row: ServiceRow) -> Result<Service, ServiceRepositoryError> {
    row.into_domain().map_err(ServiceRepositoryError::query)
}

#[async_trait]
impl ServiceRepository for DieselServiceRepository {
    async fn insert(&self, service: NewService) -> Result<Service, ServiceRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ServiceRepositoryError::connection))?;

        let supplier_id = service.supplier_id;
        let row = NewServiceRow {
            id: Uuid::new_v4(),
            supplier_id: supplier_id.as_uuid(),
            title: service.title,
            description: service.description,
            category: service.category.as_str().to_owned(),
            price: service.price,
            location: service.location,
            availability: true,
            created_at: Utc::now(),
        };

        let inserted: ServiceRow = diesel::insert_into(services::table)
            .values(&row)
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    ServiceRepositoryError::supplier_missing(supplier_id.to_string())
                } else {
                    map_error(err)
                }
            })?;

        domain_service(inserted)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, ServiceRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ServiceRepositoryError::connection))?;

        let row: Option<ServiceRow> = services::table
            .find(id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_error)?;

        row.map(domain_service).transpose()
    }

    async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, ServiceRepositoryError::connection))?;

        let joined: Vec<(ServiceRow, String, String)> = services::table
            .inner_join(users::table)
            .select((
                ServiceRow::as_select(),
                users::name,
                users::email,
            ))
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let service_ids: Vec<Uuid> = joined.iter().map(|(row, _, _)| row.id).collect();
        let ratings: Vec<ReviewRatingRow> = reviews::table
            .filter(reviews::service_id.eq_any(&service_ids))
            .select((reviews::service_id, reviews::rating))
            .load(&mut conn)
            .await
            .map_err(map_error)?;

        let mut ratings_by_service: HashMap<Uuid, Vec<i16>> = HashMap::new();
        for review in ratings {
            ratings_by_service
                .entry(review.service_id)
                .or_default()
                .push(review.rating);
        }

        joined
            .into_iter()
            .map(|(row, supplier_name, supplier_email)| {
                let ratings = ratings_by_service.remove(&row.id).unwrap_or_default();
                Ok(ServiceRecord {
                    service: domain_service(row)?,
                    supplier_name,
                    supplier_email,
                    ratings,
                })
            })
            .collect()
    }
}
