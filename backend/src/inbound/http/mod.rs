//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod bookings;
pub mod error;
pub mod events;
pub mod health;
pub mod payments;
pub mod services;
pub mod session;
pub mod social;
pub mod state;
pub mod validation;

pub use error::ApiResult;
