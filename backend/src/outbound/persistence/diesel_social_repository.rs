//! Diesel-backed social feed repository.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{SocialRepository, SocialRepositoryError};
use crate::domain::{AuthorSummary, FeedKind, NewPost, PostDetails, Role};

use super::error_mapping::{is_foreign_key_violation, map_diesel_error, map_pool_error};
use super::models::{NewSocialPostRow, SocialPostRow};
use super::pool::DbPool;
use super::schema::{social_posts, users};

/// PostgreSQL adapter for the social feed port.
#[derive(Clone)]
pub struct DieselSocialRepository {
    pool: DbPool,
}

impl DieselSocialRepository {
    /// Create a repository backed by the given pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_error(error: diesel::result::Error) -> SocialRepositoryError {
    map_diesel_error(
        error,
        SocialRepositoryError::query,
        SocialRepositoryError::connection,
    )
}

fn details(row: SocialPostRow, name: String, role: String) -> Result<PostDetails, SocialRepositoryError> {
    let role: Role = role
        .parse()
        .map_err(|err| SocialRepositoryError::query(format!("corrupt users.role column: {err}")))?;
    Ok(PostDetails {
        post: row.into_domain().map_err(SocialRepositoryError::query)?,
        author: AuthorSummary { name, role },
    })
}

#[async_trait]
impl SocialRepository for DieselSocialRepository {
    async fn insert(&self, post: NewPost) -> Result<PostDetails, SocialRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SocialRepositoryError::connection))?;

        let author_id = post.author_id;
        let row = NewSocialPostRow {
            id: Uuid::new_v4(),
            author_id: author_id.as_uuid(),
            content: post.content,
            images: post.images,
            is_promotion: post.is_promotion,
            likes: 0,
            created_at: Utc::now(),
        };

        let inserted: SocialPostRow = diesel::insert_into(social_posts::table)
            .values(&row)
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_foreign_key_violation(&err) {
                    SocialRepositoryError::author_missing(author_id.to_string())
                } else {
                    map_error(err)
                }
            })?;

        let (name, role): (String, String) = users::table
            .find(inserted.author_id)
            .select((users::name, users::role))
            .first(&mut conn)
            .await
            .map_err(map_error)?;

        details(inserted, name, role)
    }

    async fn list(
        &self,
        kind: FeedKind,
        limit: usize,
    ) -> Result<Vec<PostDetails>, SocialRepositoryError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|err| map_pool_error(err, SocialRepositoryError::connection))?;

        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let mut query = social_posts::table
            .inner_join(users::table)
            .select((SocialPostRow::as_select(), users::name, users::role))
            .order(social_posts::created_at.desc())
            .limit(limit)
            .into_boxed();
        query = match kind {
            FeedKind::All => query,
            FeedKind::Posts => query.filter(social_posts::is_promotion.eq(false)),
            FeedKind::Promotions => query.filter(social_posts::is_promotion.eq(true)),
        };

        let rows: Vec<(SocialPostRow, String, String)> =
            query.load(&mut conn).await.map_err(map_error)?;

        rows.into_iter()
            .map(|(row, name, role)| details(row, name, role))
            .collect()
    }
}
