//! Port for social feed persistence adapters.

use async_trait::async_trait;

use crate::domain::social::{FeedKind, NewPost, PostDetails};

use super::macros::define_port_error;

define_port_error! {
    /// Persistence errors raised by social feed adapters.
    pub enum SocialRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "social repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "social repository query failed: {message}",
        /// The posting author does not exist.
        AuthorMissing { id: String } => "author {id} does not exist",
    }
}

/// Port for publishing and reading feed posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SocialRepository: Send + Sync {
    /// Persist a new post with zero likes, returning it with the author
    /// summary attached.
    async fn insert(&self, post: NewPost) -> Result<PostDetails, SocialRepositoryError>;

    /// Read the newest posts in the given feed slice, newest first, capped
    /// at `limit`.
    async fn list(
        &self,
        kind: FeedKind,
        limit: usize,
    ) -> Result<Vec<PostDetails>, SocialRepositoryError>;
}
