//! Port for service listing persistence adapters.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::service::{NewService, Service, ServiceRecord};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by service repository adapters.
    pub enum ServiceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "service repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "service repository query failed: {message}",
        /// The owning supplier does not exist.
        SupplierMissing { id: String } => "supplier {id} does not exist",
    }
}

/// Port for creating and reading service listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Persist a new listing with availability on.
    async fn insert(&self, service: NewService) -> Result<Service, ServiceRepositoryError>;

    /// Look up a listing by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Service>, ServiceRepositoryError>;

    /// Read all listings joined with supplier contact and review ratings.
    /// Filtering and sorting happen in memory above this port.
    async fn list(&self) -> Result<Vec<ServiceRecord>, ServiceRepositoryError>;
}
