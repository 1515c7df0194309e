//! Driving port for the social feed.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::social::{FeedKind, NewPost, PostDetails};

/// Use-cases exposed by the social feed service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialFeed: Send + Sync {
    /// Publish a post; likes start at zero.
    async fn publish(&self, draft: NewPost) -> Result<PostDetails, Error>;

    /// Read the newest posts in a feed slice, capped at `limit`.
    async fn list_feed(&self, kind: FeedKind, limit: usize) -> Result<Vec<PostDetails>, Error>;
}
