//! Events catalogue API handler.
//!
//! ```text
//! GET /api/v1/events?category=MUSIC&search=festival&featured=true&sort=popularity
//! ```
//!
//! The catalogue is a curated in-memory set; the handler only shapes it
//! through the query/filter layer.

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::{EventListing, EventQuery, SortKey, curated_events};
use crate::inbound::http::ApiResult;

/// Query parameters for the events listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListEventsParams {
    /// Editorial category tag; absent or `all` passes everything.
    pub category: Option<String>,
    /// Case-insensitive substring over title, description, and location.
    pub search: Option<String>,
    /// `true` keeps featured events only.
    pub featured: Option<String>,
    /// Sort key; unknown values fall back to `date`.
    pub sort: Option<String>,
}

impl From<ListEventsParams> for EventQuery {
    fn from(params: ListEventsParams) -> Self {
        let category = params
            .category
            .filter(|raw| !raw.eq_ignore_ascii_case("all"));
        EventQuery {
            category,
            search: params.search,
            featured_only: params.featured.as_deref() == Some("true"),
            sort: Some(SortKey::parse_or(
                params.sort.as_deref(),
                EventQuery::DEFAULT_SORT,
            )),
        }
    }
}

/// List curated events.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    params(ListEventsParams),
    responses(
        (status = 200, description = "Events", body = [EventListing]),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["events"],
    operation_id = "listEvents",
    security([])
)]
#[get("/events")]
pub async fn list_events(
    params: web::Query<ListEventsParams>,
) -> ApiResult<web::Json<Vec<EventListing>>> {
    let query = EventQuery::from(params.into_inner());
    Ok(web::Json(query.apply(curated_events())))
}
