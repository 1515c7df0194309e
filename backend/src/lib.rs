//! ServiceHub marketplace backend.
//!
//! A service marketplace with session-cookie auth, supplier-owned listings,
//! client bookings, admin payment verification crediting suppliers, a curated
//! events catalogue, and a shared social feed. Laid out hexagonally: `domain`
//! holds the use-cases behind ports, `inbound::http` maps them onto REST, and
//! `outbound::persistence` implements the repository ports on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
