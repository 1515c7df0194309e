//! Bookings API handlers.
//!
//! ```text
//! POST /api/v1/bookings {"serviceId":"...","totalAmount":100,"notes":"..."}
//! GET  /api/v1/bookings?clientId=...&supplierId=...&status=PENDING
//! ```

use actix_web::{HttpResponse, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::ports::BookingFilter;
use crate::domain::{BookingDetails, BookingStatus, Error, NewBooking, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, missing_field_error, parse_optional_timestamp, require_uuid,
};

/// Request body for creating a booking. The payment proof is an opaque
/// reference supplied by the client alongside the booking.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Service to book.
    pub service_id: Option<String>,
    /// Optional requested date, RFC 3339.
    #[serde(default)]
    pub booking_date: Option<String>,
    /// Optional free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Amount the client commits to pay; positive.
    #[schema(value_type = f64, example = 100.0)]
    pub total_amount: Option<Decimal>,
    /// Opaque reference to the uploaded payment proof.
    #[serde(default)]
    pub payment_proof: Option<String>,
}

/// Query parameters for the bookings listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListBookingsParams {
    /// Keep bookings made by this client.
    pub client_id: Option<String>,
    /// Keep bookings against this supplier's services.
    pub supplier_id: Option<String>,
    /// Keep bookings in this status; absent or `all` passes everything.
    pub status: Option<String>,
}

fn filter_from(params: ListBookingsParams) -> Result<BookingFilter, Error> {
    let parse_user = |value: Option<String>, field| -> Result<Option<UserId>, Error> {
        value
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| require_uuid(Some(raw), field).map(UserId::from_uuid))
            .transpose()
    };
    let status = match params.status.as_deref() {
        None | Some("all" | "ALL") => None,
        Some(raw) => Some(raw.parse::<BookingStatus>().map_err(|err| {
            invalid_value_error(FieldName::new("status"), err)
        })?),
    };
    Ok(BookingFilter {
        client_id: parse_user(params.client_id, FieldName::new("clientId"))?,
        supplier_id: parse_user(params.supplier_id, FieldName::new("supplierId"))?,
        status,
    })
}

/// Create a booking for the logged-in client.
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingDetails),
        (status = 400, description = "Invalid request or service unavailable", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Unknown service", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "createBooking"
)]
#[post("/bookings")]
pub async fn create_booking(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateBookingRequest>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user()?;
    let payload = payload.into_inner();

    let draft = NewBooking {
        service_id: require_uuid(payload.service_id, FieldName::new("serviceId"))?,
        client_id: user.id,
        booking_date: parse_optional_timestamp(
            payload.booking_date,
            FieldName::new("bookingDate"),
        )?,
        notes: payload.notes.filter(|raw| !raw.trim().is_empty()),
        total_amount: payload
            .total_amount
            .ok_or_else(|| missing_field_error(FieldName::new("totalAmount")))?,
        payment_proof: payload.payment_proof.filter(|raw| !raw.trim().is_empty()),
    };

    let details = state.bookings.create_booking(draft).await?;
    Ok(HttpResponse::Created().json(details))
}

/// List bookings with nested service and client details.
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    params(ListBookingsParams),
    responses(
        (status = 200, description = "Bookings, newest first", body = [BookingDetails]),
        (status = 400, description = "Malformed filter", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["bookings"],
    operation_id = "listBookings",
    security([])
)]
#[get("/bookings")]
pub async fn list_bookings(
    state: web::Data<HttpState>,
    params: web::Query<ListBookingsParams>,
) -> ApiResult<web::Json<Vec<BookingDetails>>> {
    let filter = filter_from(params.into_inner())?;
    let bookings = state.bookings.list_bookings(filter).await?;
    Ok(web::Json(bookings))
}
