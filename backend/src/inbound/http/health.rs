//! Health probe handlers.
//!
//! ```text
//! GET /healthz/live
//! GET /healthz/ready
//! ```
//!
//! Liveness answers as long as the process serves requests. Readiness is
//! currently equivalent; the probes are split so readiness can later gate on
//! pool health without changing deployment manifests.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;

/// Probe response body.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct HealthStatus {
    /// `ok` when the probe passes.
    pub status: &'static str,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/healthz/live",
    responses((status = 200, description = "Process is alive", body = HealthStatus)),
    tags = ["health"],
    operation_id = "liveness",
    security([])
)]
#[get("/live")]
pub async fn live() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus { status: "ok" })
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/healthz/ready",
    responses((status = 200, description = "Ready to serve traffic", body = HealthStatus)),
    tags = ["health"],
    operation_id = "readiness",
    security([])
)]
#[get("/ready")]
pub async fn ready() -> HttpResponse {
    HttpResponse::Ok().json(HealthStatus { status: "ok" })
}

/// Mount both probes under `/healthz`.
pub fn scope() -> actix_web::Scope {
    web::scope("/healthz").service(live).service(ready)
}
