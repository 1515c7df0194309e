//! Driving port for the service catalogue.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::listing::{ServiceListing, ServiceQuery};
use crate::domain::service::{NewService, Service};

/// Use-cases exposed by the catalogue service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceCatalogue: Send + Sync {
    /// List services with supplier summary and per-read rating aggregation,
    /// shaped by the typed query specification.
    async fn list_services(&self, query: ServiceQuery) -> Result<Vec<ServiceListing>, Error>;

    /// Create a listing owned by a supplier, available by default.
    async fn create_service(&self, draft: NewService) -> Result<Service, Error>;
}
