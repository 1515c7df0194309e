//! Domain ports.
//!
//! Driven ports (`*Repository`) are implemented by persistence adapters in
//! `outbound::persistence`; driving ports (use-case traits) are implemented
//! by the domain services and consumed by the HTTP adapter.

mod accounts;
mod booking_repository;
mod bookings;
mod catalogue;
pub(crate) mod macros;
mod payments;
mod service_repository;
mod social_feed;
mod social_repository;
mod user_repository;

pub use accounts::{Accounts, Credentials};
pub use booking_repository::{BookingRepository, BookingRepositoryError};
pub use bookings::{BookingFilter, Bookings};
pub use catalogue::ServiceCatalogue;
pub use payments::Payments;
pub use service_repository::{ServiceRepository, ServiceRepositoryError};
pub use social_feed::SocialFeed;
pub use social_repository::{SocialRepository, SocialRepositoryError};
pub use user_repository::{UserRepository, UserRepositoryError};

#[cfg(test)]
pub use accounts::MockAccounts;
#[cfg(test)]
pub use booking_repository::MockBookingRepository;
#[cfg(test)]
pub use bookings::MockBookings;
#[cfg(test)]
pub use catalogue::MockServiceCatalogue;
#[cfg(test)]
pub use payments::MockPayments;
#[cfg(test)]
pub use service_repository::MockServiceRepository;
#[cfg(test)]
pub use social_feed::MockSocialFeed;
#[cfg(test)]
pub use social_repository::MockSocialRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
