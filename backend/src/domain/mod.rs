//! Domain layer: entities, ports, and the services behind the HTTP adapter.
//!
//! The services here own the marketplace rules — validation, the payment
//! state machine, filtering and rating aggregation — and speak to the
//! outside world only through the port traits in [`ports`].

mod accounts;
mod booking;
mod booking_service;
mod catalogue;
mod error;
mod events;
mod listing;
mod payments;
mod review;
mod service;
mod social;
mod social_service;
mod user;

pub mod ports;

pub use accounts::AccountService;
pub use booking::{
    BookedServiceSummary, Booking, BookingDetails, BookingStatus, NewBooking,
};
pub use booking_service::BookingService;
pub use catalogue::CatalogueService;
pub use error::{Error, ErrorCode};
pub use events::{curated_events, EventListing, EventQuery};
pub use listing::{
    CategoryFilter, ServiceListing, ServiceQuery, SortKey, SupplierSummary,
};
pub use payments::{
    supplier_credit, PaymentAction, PaymentService, PaymentStatus, PaymentView,
    COMMISSION_RATE, MANUAL_PAYMENT_METHOD,
};
pub use review::{average_rating, Review};
pub use service::{Category, NewService, Service, ServiceRecord, ServiceValidationError};
pub use social::{AuthorSummary, FeedKind, NewPost, PostDetails, SocialPost};
pub use social_service::{SocialService, DEFAULT_FEED_LIMIT};
pub use user::{ContactSummary, NewUser, Role, User, UserId, UserProfile, UserValidationError};
