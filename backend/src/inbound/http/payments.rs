//! Payment verification API handlers.
//!
//! ```text
//! GET  /api/v1/payments?status=PENDING
//! POST /api/v1/payments {"bookingId":"...","action":"verify"}
//! POST /api/v1/payments {"bookingId":"...","action":"reject","reason":"..."}
//! ```
//!
//! Both endpoints are restricted to the administrator.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    BookingDetails, Error, PaymentAction, PaymentStatus, PaymentView, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, require_text, require_uuid,
};

/// Query parameters for the verification listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListPaymentsParams {
    /// `PENDING`, `VERIFIED`, `REJECTED`, or `all` (default).
    pub status: Option<String>,
}

/// Request body for a payment decision.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDecisionRequest {
    /// Booking whose payment is being decided.
    pub booking_id: Option<String>,
    /// `verify` or `reject`.
    pub action: Option<String>,
    /// Required when rejecting.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Response body for a payment decision.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDecisionResponse {
    /// Human-readable confirmation.
    pub message: &'static str,
    /// The booking after the transition.
    pub booking: BookingDetails,
}

/// List payment verification views derived from proof-bearing bookings.
#[utoipa::path(
    get,
    path = "/api/v1/payments",
    params(ListPaymentsParams),
    responses(
        (status = 200, description = "Verification views, newest first", body = [PaymentView]),
        (status = 400, description = "Unknown status", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "listPayments"
)]
#[get("/payments")]
pub async fn list_payments(
    state: web::Data<HttpState>,
    session: SessionContext,
    params: web::Query<ListPaymentsParams>,
) -> ApiResult<web::Json<Vec<PaymentView>>> {
    session.require_role(Role::Admin)?;
    let status = match params.into_inner().status.as_deref() {
        None | Some("all" | "ALL") => None,
        Some(raw) => Some(raw.parse::<PaymentStatus>().map_err(|err| {
            invalid_value_error(FieldName::new("status"), err)
        })?),
    };
    let views = state.payments.list_payments(status).await?;
    Ok(web::Json(views))
}

/// Apply a verify/reject decision to a pending payment.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = PaymentDecisionRequest,
    responses(
        (status = 200, description = "Decision applied", body = PaymentDecisionResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Admin role required", body = Error),
        (status = 404, description = "Unknown booking", body = Error),
        (status = 409, description = "Booking already settled", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["payments"],
    operation_id = "decidePayment"
)]
#[post("/payments")]
pub async fn decide_payment(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<PaymentDecisionRequest>,
) -> ApiResult<HttpResponse> {
    session.require_role(Role::Admin)?;
    let payload = payload.into_inner();

    let booking_id = require_uuid(payload.booking_id, FieldName::new("bookingId"))?;
    let action = require_text(payload.action, FieldName::new("action"))?;
    let action = PaymentAction::parse(&action, payload.reason)?;

    let message = match action {
        PaymentAction::Verify => "Payment verified successfully",
        PaymentAction::Reject { .. } => "Payment rejected successfully",
    };
    let booking = state.payments.decide(booking_id, action).await?;
    Ok(HttpResponse::Ok().json(PaymentDecisionResponse { message, booking }))
}
