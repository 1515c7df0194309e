//! Social feed posts from users and suppliers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::{Role, UserId};

/// A post on the shared feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    /// Stable identifier.
    pub id: Uuid,
    /// Posting user.
    pub author_id: UserId,
    /// Post body.
    pub content: String,
    /// Opaque references to attached images.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub images: Vec<String>,
    /// Suppliers mark promotional posts so clients can filter them out.
    pub is_promotion: bool,
    /// Like counter. Non-negative.
    pub likes: u32,
    /// Publication timestamp.
    pub created_at: DateTime<Utc>,
}

/// Author summary attached to feed reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSummary {
    /// Display name.
    pub name: String,
    /// Marketplace role, shown as a badge on the feed.
    pub role: Role,
}

/// Post joined with its author summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostDetails {
    /// The post itself.
    #[serde(flatten)]
    pub post: SocialPost,
    /// Author name and role.
    pub author: AuthorSummary,
}

/// Draft for publishing a post. Likes start at zero.
#[derive(Debug, Clone)]
pub struct NewPost {
    /// Posting user.
    pub author_id: UserId,
    /// Post body. Non-empty.
    pub content: String,
    /// Opaque references to attached images.
    pub images: Vec<String>,
    /// Promotion flag.
    pub is_promotion: bool,
}

/// Feed slice selector: everything, organic posts, or promotions only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedKind {
    /// No promotion filtering.
    #[default]
    All,
    /// Organic posts only.
    Posts,
    /// Promotions only.
    Promotions,
}

impl FeedKind {
    /// Whether a post with the given promotion flag belongs to this slice.
    pub const fn admits(self, is_promotion: bool) -> bool {
        match self {
            Self::All => true,
            Self::Posts => !is_promotion,
            Self::Promotions => is_promotion,
        }
    }
}

impl FromStr for FeedKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "all" => Ok(Self::All),
            "posts" => Ok(Self::Posts),
            "promotions" => Ok(Self::Promotions),
            other => Err(format!("unknown feed type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(FeedKind::All, true, true)]
    #[case(FeedKind::All, false, true)]
    #[case(FeedKind::Posts, true, false)]
    #[case(FeedKind::Posts, false, true)]
    #[case(FeedKind::Promotions, true, true)]
    #[case(FeedKind::Promotions, false, false)]
    fn feed_kind_admits(
        #[case] kind: FeedKind,
        #[case] is_promotion: bool,
        #[case] expected: bool,
    ) {
        assert_eq!(kind.admits(is_promotion), expected);
    }
}
