//! Service catalogue API handlers.
//!
//! ```text
//! GET  /api/v1/services?category=DINING&search=cruise&sort=price-low
//! POST /api/v1/services {"title":"...","description":"...","category":"DINING","price":100}
//! ```

use actix_web::{HttpResponse, get, post, web};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    CategoryFilter, Error, NewService, Role, ServiceListing, ServiceQuery, SortKey,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, invalid_value_error, missing_field_error, require_text,
};

/// Query parameters for the catalogue listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListServicesParams {
    /// Category filter; `ALL`/`all` or absent passes everything.
    pub category: Option<String>,
    /// Case-insensitive substring over title, description, and location.
    pub search: Option<String>,
    /// Sort key; unknown values fall back to `price-low`.
    pub sort: Option<String>,
}

impl TryFrom<ListServicesParams> for ServiceQuery {
    type Error = Error;

    fn try_from(params: ListServicesParams) -> Result<Self, Self::Error> {
        let category = CategoryFilter::from_param(params.category.as_deref())
            .map_err(|err| invalid_value_error(FieldName::new("category"), err))?;
        Ok(ServiceQuery {
            category,
            search: params.search,
            sort: Some(SortKey::parse_or(
                params.sort.as_deref(),
                ServiceQuery::DEFAULT_SORT,
            )),
        })
    }
}

/// Request body for creating a listing.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceRequest {
    /// Listing title.
    pub title: Option<String>,
    /// Listing description.
    pub description: Option<String>,
    /// `EVENTS`, `TRANSPORTATION`, `DINING`, or `ACCOMMODATION`.
    pub category: Option<String>,
    /// Price per booking; positive.
    #[schema(value_type = f64, example = 100.0)]
    pub price: Option<Decimal>,
    /// Optional location shown on cards.
    #[serde(default)]
    pub location: Option<String>,
}

/// List catalogue services with supplier summary and rating aggregate.
#[utoipa::path(
    get,
    path = "/api/v1/services",
    params(ListServicesParams),
    responses(
        (status = 200, description = "Service listings", body = [ServiceListing]),
        (status = 400, description = "Unknown category", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["services"],
    operation_id = "listServices",
    security([])
)]
#[get("/services")]
pub async fn list_services(
    state: web::Data<HttpState>,
    params: web::Query<ListServicesParams>,
) -> ApiResult<web::Json<Vec<ServiceListing>>> {
    let query = ServiceQuery::try_from(params.into_inner())?;
    let listings = state.catalogue.list_services(query).await?;
    Ok(web::Json(listings))
}

/// Create a listing owned by the logged-in supplier.
#[utoipa::path(
    post,
    path = "/api/v1/services",
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = crate::domain::Service),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Supplier role required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["services"],
    operation_id = "createService"
)]
#[post("/services")]
pub async fn create_service(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateServiceRequest>,
) -> ApiResult<HttpResponse> {
    let supplier = session.require_role(Role::Supplier)?;
    let payload = payload.into_inner();

    let category = require_text(payload.category, FieldName::new("category"))?
        .parse()
        .map_err(|err: crate::domain::ServiceValidationError| {
            invalid_value_error(FieldName::new("category"), err.to_string())
        })?;
    let draft = NewService {
        supplier_id: supplier.id,
        title: require_text(payload.title, FieldName::new("title"))?,
        description: require_text(payload.description, FieldName::new("description"))?,
        category,
        price: payload
            .price
            .ok_or_else(|| missing_field_error(FieldName::new("price")))?,
        location: payload.location.filter(|raw| !raw.trim().is_empty()),
    };

    let service = state.catalogue.create_service(draft).await?;
    Ok(HttpResponse::Created().json(service))
}
