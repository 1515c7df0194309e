//! Reviews and rating aggregation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;

/// A client's review of a booked service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Stable identifier.
    pub id: Uuid,
    /// Reviewed service.
    pub service_id: Uuid,
    /// Reviewing client.
    pub client_id: UserId,
    /// Star rating, `1..=5`.
    pub rating: i16,
    /// Optional comment text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Submission timestamp.
    pub created_at: DateTime<Utc>,
}

/// Arithmetic mean of review ratings; zero for an empty set.
///
/// Recomputed on every listing read rather than cached, so staleness cannot
/// arise.
pub fn average_rating(ratings: &[i16]) -> Decimal {
    if ratings.is_empty() {
        return Decimal::ZERO;
    }
    let sum: i64 = ratings.iter().map(|rating| i64::from(*rating)).sum();
    Decimal::from(sum) / Decimal::from(ratings.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    fn empty_set_averages_to_zero() {
        assert_eq!(average_rating(&[]), Decimal::ZERO);
    }

    #[rstest]
    fn three_four_five_averages_to_four() {
        assert_eq!(average_rating(&[3, 4, 5]), dec!(4));
    }

    #[rstest]
    fn uneven_sets_keep_fractions() {
        assert_eq!(average_rating(&[4, 5]), dec!(4.5));
    }
}
