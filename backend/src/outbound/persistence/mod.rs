//! PostgreSQL persistence adapters using Diesel.
//!
//! Thin adapters only: each repository translates between Diesel rows and
//! domain types, maps database errors onto the port error enums, and keeps
//! `schema.rs`/`models.rs` internal. Connections come from a bb8 pool over
//! `diesel-async`.

mod diesel_booking_repository;
mod diesel_service_repository;
mod diesel_social_repository;
mod diesel_user_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_booking_repository::DieselBookingRepository;
pub use diesel_service_repository::DieselServiceRepository;
pub use diesel_social_repository::DieselSocialRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
