//! In-memory query/filter layer for listing reads.
//!
//! Collections at this scale are filtered and sorted in memory after the
//! repository read. Filter specifications are typed values rather than
//! stringly-typed where-clauses; applying one is side-effect free and
//! deterministic for a given input.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use super::review::average_rating;
use super::service::{Category, Service};

/// Category axis of a listing query. `All` is the identity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Pass every category through.
    #[default]
    All,
    /// Keep exactly one category.
    Only(Category),
}

impl CategoryFilter {
    /// Parse a query-string value. Absent, `ALL`, and `all` mean no filter.
    pub fn from_param(raw: Option<&str>) -> Result<Self, String> {
        match raw {
            None | Some("ALL" | "all") => Ok(Self::All),
            Some(other) => other
                .parse::<Category>()
                .map(Self::Only)
                .map_err(|err| err.to_string()),
        }
    }

    /// Whether a listing in `category` passes this filter.
    pub fn admits(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == category,
        }
    }
}

/// Recognised sort orders for listing reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// Ascending by price.
    PriceLow,
    /// Descending by price.
    PriceHigh,
    /// Descending by aggregate rating.
    Rating,
    /// Ascending by event or creation date.
    Date,
    /// Descending by attendee/interaction count.
    Popularity,
    /// Descending by creation time.
    Newest,
}

impl SortKey {
    /// Parse a query-string value, falling back to `default` for unknown or
    /// absent keys. Never an error.
    pub fn parse_or(raw: Option<&str>, default: Self) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or(default)
    }
}

impl FromStr for SortKey {
    type Err = ();

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            "rating" => Ok(Self::Rating),
            "date" => Ok(Self::Date),
            "popularity" => Ok(Self::Popularity),
            "newest" => Ok(Self::Newest),
            _ => Err(()),
        }
    }
}

/// Case-insensitive OR-combined substring match over searchable fields.
pub fn text_matches<'a>(
    search: &str,
    fields: impl IntoIterator<Item = Option<&'a str>>,
) -> bool {
    let needle = search.to_lowercase();
    fields
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Supplier summary carried on service listings.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SupplierSummary {
    /// Supplier display name.
    pub name: String,
    /// Supplier contact email.
    pub email: String,
    /// Aggregate rating across the supplier's listing.
    #[schema(value_type = String, example = "4.5")]
    pub rating: Decimal,
}

/// Service listing enriched for catalogue reads.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListing {
    /// The listing itself.
    #[serde(flatten)]
    pub service: Service,
    /// Supplier summary shown on cards.
    pub supplier: SupplierSummary,
    /// Mean review rating, recomputed on each read. Zero when unreviewed.
    #[schema(value_type = String, example = "4.0")]
    pub average_rating: Decimal,
    /// Number of reviews backing the average.
    pub review_count: usize,
}

impl ServiceListing {
    /// Enrich a listing with its rating aggregate.
    pub fn from_parts(
        service: Service,
        supplier_name: String,
        supplier_email: String,
        ratings: &[i16],
    ) -> Self {
        let average = average_rating(ratings);
        Self {
            service,
            supplier: SupplierSummary {
                name: supplier_name,
                email: supplier_email,
                rating: average,
            },
            average_rating: average,
            review_count: ratings.len(),
        }
    }
}

/// Typed filter/sort specification for the service catalogue.
#[derive(Debug, Clone, Default)]
pub struct ServiceQuery {
    /// Category axis; `All` is identity.
    pub category: CategoryFilter,
    /// Case-insensitive substring over title, description, and location.
    pub search: Option<String>,
    /// Sort order; services default to [`SortKey::PriceLow`].
    pub sort: Option<SortKey>,
}

impl ServiceQuery {
    /// Default sort for the service catalogue.
    pub const DEFAULT_SORT: SortKey = SortKey::PriceLow;

    /// Apply the specification to a listing collection.
    pub fn apply(&self, mut listings: Vec<ServiceListing>) -> Vec<ServiceListing> {
        listings.retain(|listing| self.category.admits(listing.service.category));
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            listings.retain(|listing| {
                text_matches(
                    search,
                    [
                        Some(listing.service.title.as_str()),
                        Some(listing.service.description.as_str()),
                        listing.service.location.as_deref(),
                    ],
                )
            });
        }

        match self.sort.unwrap_or(Self::DEFAULT_SORT) {
            SortKey::PriceLow => {
                listings.sort_by(|a, b| a.service.price.cmp(&b.service.price));
            }
            SortKey::PriceHigh => {
                listings.sort_by(|a, b| b.service.price.cmp(&a.service.price));
            }
            SortKey::Rating => {
                listings.sort_by(|a, b| b.average_rating.cmp(&a.average_rating));
            }
            SortKey::Date => {
                listings.sort_by(|a, b| a.service.created_at.cmp(&b.service.created_at));
            }
            SortKey::Popularity => {
                listings.sort_by(|a, b| b.review_count.cmp(&a.review_count));
            }
            SortKey::Newest => {
                listings.sort_by(|a, b| b.service.created_at.cmp(&a.service.created_at));
            }
        }
        listings
    }
}
