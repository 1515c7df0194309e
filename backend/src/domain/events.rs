//! Curated event listings.
//!
//! Events are an editorial catalogue rather than supplier-owned rows; they
//! are served from a fixed in-memory set and shaped by the same query/filter
//! layer as services.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use utoipa::ToSchema;

use super::listing::{text_matches, SortKey};

/// A listed event.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventListing {
    /// Stable identifier within the curated set.
    pub id: &'static str,
    /// Event title.
    pub title: &'static str,
    /// Event description.
    pub description: &'static str,
    /// Editorial category tag (e.g. `MUSIC`).
    pub category: &'static str,
    /// Ticket price.
    #[schema(value_type = String, example = "75")]
    pub price: Decimal,
    /// Event date.
    pub date: NaiveDate,
    /// Venue.
    pub location: &'static str,
    /// Whether the event is editorially featured.
    pub is_featured: bool,
    /// Venue capacity.
    pub max_attendees: u32,
    /// Tickets sold so far.
    pub current_attendees: u32,
}

/// Typed filter/sort specification for the events catalogue.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Exact category tag; `None` (or the `all` sentinel upstream) passes all.
    pub category: Option<String>,
    /// Case-insensitive substring over title, description, and location.
    pub search: Option<String>,
    /// Keep featured events only.
    pub featured_only: bool,
    /// Sort order; events default to [`SortKey::Date`].
    pub sort: Option<SortKey>,
}

impl EventQuery {
    /// Default sort for the events catalogue.
    pub const DEFAULT_SORT: SortKey = SortKey::Date;

    /// Apply the specification to an event collection.
    pub fn apply(&self, mut events: Vec<EventListing>) -> Vec<EventListing> {
        if let Some(category) = self.category.as_deref() {
            let wanted = category.to_uppercase();
            events.retain(|event| event.category == wanted);
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            events.retain(|event| {
                text_matches(
                    search,
                    [
                        Some(event.title),
                        Some(event.description),
                        Some(event.location),
                    ],
                )
            });
        }
        if self.featured_only {
            events.retain(|event| event.is_featured);
        }

        match self.sort.unwrap_or(Self::DEFAULT_SORT) {
            SortKey::Date => events.sort_by(|a, b| a.date.cmp(&b.date)),
            SortKey::PriceLow => events.sort_by(|a, b| a.price.cmp(&b.price)),
            SortKey::PriceHigh => events.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Popularity => {
                events.sort_by(|a, b| b.current_attendees.cmp(&a.current_attendees));
            }
            // Rating and Newest have no event-side data; keep the default
            // date order rather than erroring.
            SortKey::Rating | SortKey::Newest => events.sort_by(|a, b| a.date.cmp(&b.date)),
        }
        events
    }
}

/// The curated event set served by `GET /events`.
pub fn curated_events() -> Vec<EventListing> {
    let price = |value: u32| Decimal::from_u32(value).unwrap_or(Decimal::ZERO);
    let date = |y: i32, m: u32, d: u32| {
        NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
    };
    vec![
        EventListing {
            id: "1",
            title: "Summer Music Festival",
            description: "Experience the best live music performances this summer with top artists from around the world.",
            category: "MUSIC",
            price: price(75),
            date: date(2026, 3, 25),
            location: "Central Park Amphitheater",
            is_featured: true,
            max_attendees: 500,
            current_attendees: 245,
        },
        EventListing {
            id: "2",
            title: "Tech Innovation Summit",
            description: "Join industry leaders and innovators for the latest in technology, AI, and startup culture.",
            category: "TECHNOLOGY",
            price: price(120),
            date: date(2026, 4, 2),
            location: "Convention Center Hall A",
            is_featured: true,
            max_attendees: 300,
            current_attendees: 187,
        },
        EventListing {
            id: "3",
            title: "Food & Wine Festival",
            description: "Taste exquisite cuisines from top chefs paired with fine wines from renowned vineyards.",
            category: "FOOD_DRINK",
            price: price(45),
            date: date(2026, 4, 15),
            location: "Riverside Park",
            is_featured: false,
            max_attendees: 800,
            current_attendees: 423,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn default_sort_is_by_date_ascending() {
        let events = EventQuery::default().apply(curated_events());
        let dates: Vec<_> = events.iter().map(|e| e.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[rstest]
    fn category_filter_is_case_insensitive_on_input() {
        let query = EventQuery {
            category: Some("music".to_owned()),
            ..EventQuery::default()
        };
        let events = query.apply(curated_events());
        assert_eq!(events.len(), 1);
        assert_eq!(events.first().map(|e| e.category), Some("MUSIC"));
    }

    #[rstest]
    fn featured_filter_drops_unfeatured() {
        let query = EventQuery {
            featured_only: true,
            ..EventQuery::default()
        };
        assert!(query.apply(curated_events()).iter().all(|e| e.is_featured));
    }

    #[rstest]
    fn popularity_sorts_by_attendees_descending() {
        let query = EventQuery {
            sort: Some(SortKey::Popularity),
            ..EventQuery::default()
        };
        let events = query.apply(curated_events());
        let attendees: Vec<_> = events.iter().map(|e| e.current_attendees).collect();
        assert_eq!(attendees, vec![423, 245, 187]);
    }
}
