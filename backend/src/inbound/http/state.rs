//! Shared HTTP adapter state.
//!
//! Handlers receive the domain use-cases as trait objects via
//! `actix_web::web::Data`, so the HTTP layer depends on ports only and stays
//! testable with in-memory implementations.

use std::sync::Arc;

use crate::domain::ports::{Accounts, Bookings, Payments, ServiceCatalogue, SocialFeed};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Registration and login.
    pub accounts: Arc<dyn Accounts>,
    /// Service catalogue reads and writes.
    pub catalogue: Arc<dyn ServiceCatalogue>,
    /// Booking creation and listing.
    pub bookings: Arc<dyn Bookings>,
    /// Payment verification decisions and views.
    pub payments: Arc<dyn Payments>,
    /// Social feed.
    pub social: Arc<dyn SocialFeed>,
}
