//! Social feed API handlers.
//!
//! ```text
//! GET  /api/v1/social?type=promotions&limit=10
//! POST /api/v1/social {"content":"...","isPromotion":true}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{DEFAULT_FEED_LIMIT, Error, FeedKind, NewPost, PostDetails};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_value_error, require_text};

/// Query parameters for the feed listing.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListFeedParams {
    /// Feed slice: `all` (default), `posts`, or `promotions`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Maximum number of posts to return; defaults to 20.
    pub limit: Option<usize>,
}

/// Request body for publishing a post.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Post body.
    pub content: Option<String>,
    /// Opaque references to attached images.
    #[serde(default)]
    pub images: Vec<String>,
    /// Marks the post as a promotion.
    #[serde(default)]
    pub is_promotion: bool,
}

/// Read the feed, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/social",
    params(ListFeedParams),
    responses(
        (status = 200, description = "Posts, newest first", body = [PostDetails]),
        (status = 400, description = "Unknown feed type", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["social"],
    operation_id = "listFeed",
    security([])
)]
#[get("/social")]
pub async fn list_feed(
    state: web::Data<HttpState>,
    params: web::Query<ListFeedParams>,
) -> ApiResult<web::Json<Vec<PostDetails>>> {
    let params = params.into_inner();
    let kind = match params.kind.as_deref() {
        None => FeedKind::default(),
        Some(raw) => raw
            .parse::<FeedKind>()
            .map_err(|err| invalid_value_error(FieldName::new("type"), err))?,
    };
    let limit = params.limit.unwrap_or(DEFAULT_FEED_LIMIT);
    let posts = state.social.list_feed(kind, limit).await?;
    Ok(web::Json(posts))
}

/// Publish a post as the logged-in user.
#[utoipa::path(
    post,
    path = "/api/v1/social",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post published", body = PostDetails),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["social"],
    operation_id = "createPost"
)]
#[post("/social")]
pub async fn create_post(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let user = session.require_user()?;
    let payload = payload.into_inner();

    let draft = NewPost {
        author_id: user.id,
        content: require_text(payload.content, FieldName::new("content"))?,
        images: payload.images,
        is_promotion: payload.is_promotion,
    };
    let details = state.social.publish(draft).await?;
    Ok(HttpResponse::Created().json(details))
}
