//! Service catalogue: listing reads and listing creation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::error::Error;
use super::listing::{ServiceListing, ServiceQuery};
use super::ports::{ServiceCatalogue, ServiceRepository, ServiceRepositoryError};
use super::service::{NewService, Service};

fn map_repository_error(error: ServiceRepositoryError) -> Error {
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

/// Catalogue service over the service repository port.
#[derive(Clone)]
pub struct CatalogueService<R> {
    services: Arc<R>,
}

impl<R> CatalogueService<R> {
    /// Create the service with its repository.
    pub fn new(services: Arc<R>) -> Self {
        Self { services }
    }
}

#[async_trait]
impl<R> ServiceCatalogue for CatalogueService<R>
where
    R: ServiceRepository,
{
    async fn list_services(&self, query: ServiceQuery) -> Result<Vec<ServiceListing>, Error> {
        let records = self.services.list().await.map_err(map_repository_error)?;

        // Ratings aggregate per read; the filter layer then shapes the set.
        let listings = records
            .into_iter()
            .map(|record| {
                ServiceListing::from_parts(
                    record.service,
                    record.supplier_name,
                    record.supplier_email,
                    &record.ratings,
                )
            })
            .collect();
        Ok(query.apply(listings))
    }

    async fn create_service(&self, draft: NewService) -> Result<Service, Error> {
        draft
            .validate()
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let service = self
            .services
            .insert(draft)
            .await
            .map_err(map_repository_error)?;
        info!(service_id = %service.id, supplier_id = %service.supplier_id, "service listed");
        Ok(service)
    }
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
