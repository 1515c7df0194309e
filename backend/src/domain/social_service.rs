//! Social feed service: publishing and slicing the shared feed.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::error::Error;
use super::ports::{SocialFeed, SocialRepository, SocialRepositoryError};
use super::social::{FeedKind, NewPost, PostDetails};

/// Feed reads return at most this many posts unless the caller asks for
/// fewer.
pub const DEFAULT_FEED_LIMIT: usize = 20;

fn map_repository_error(error: SocialRepositoryError) -> Error {
    match error {
        SocialRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("social repository unavailable: {message}"))
        }
        SocialRepositoryError::Query { message } => {
            Error::internal(format!("social repository error: {message}"))
        }
        SocialRepositoryError::AuthorMissing { id } => {
            Error::not_found(format!("author {id} does not exist"))
        }
    }
}

/// Feed service over the social repository port.
#[derive(Clone)]
pub struct SocialService<R> {
    posts: Arc<R>,
}

impl<R> SocialService<R> {
    /// Create the service with its repository.
    pub fn new(posts: Arc<R>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl<R> SocialFeed for SocialService<R>
where
    R: SocialRepository,
{
    async fn publish(&self, draft: NewPost) -> Result<PostDetails, Error> {
        if draft.content.trim().is_empty() {
            return Err(Error::invalid_request("post content must not be empty"));
        }

        let details = self
            .posts
            .insert(draft)
            .await
            .map_err(map_repository_error)?;
        info!(
            post_id = %details.post.id,
            author_id = %details.post.author_id,
            promotion = details.post.is_promotion,
            "post published"
        );
        Ok(details)
    }

    async fn list_feed(&self, kind: FeedKind, limit: usize) -> Result<Vec<PostDetails>, Error> {
        self.posts
            .list(kind, limit)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "social_service_tests.rs"]
mod tests;
