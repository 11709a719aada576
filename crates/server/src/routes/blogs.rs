//! Blog route handlers.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use validator::Validate;

use goodwill_core::{Blog, BlogId, DEFAULT_BLOG_CATEGORY, NewBlog};

use super::{display_date, parse_leading_int};
use crate::error::Result;
use crate::state::AppState;
use crate::storage::Storage;

/// Byline used when a post is submitted without one.
pub const DEFAULT_AUTHOR: &str = "GOODWILL GLOBAL EXPORTS";

/// A blog post as returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct BlogView {
    #[serde(flatten)]
    pub blog: Blog,
    pub image: String,
    /// Creation date as `M/D/YYYY`.
    pub date: String,
}

impl From<Blog> for BlogView {
    fn from(blog: Blog) -> Self {
        Self {
            image: blog.image_url.clone(),
            date: display_date(&blog.created_at),
            blog,
        }
    }
}

/// Body of `POST /api/blogs`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[validate(required, length(min = 1))]
    pub title: Option<String>,
    #[validate(required, length(min = 1))]
    pub content: Option<String>,
    #[validate(required, length(min = 1))]
    pub image: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

impl CreateBlogRequest {
    fn into_new_blog(self) -> NewBlog {
        let or_default = |value: Option<String>, default: &str| {
            value
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        NewBlog {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            image_url: self.image.unwrap_or_default(),
            author: or_default(self.author, DEFAULT_AUTHOR),
            category: or_default(self.category, DEFAULT_BLOG_CATEGORY),
        }
    }
}

/// List all blog posts.
///
/// GET /api/blogs
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<BlogView>>> {
    let blogs = state.storage().list_blogs().await?;
    Ok(Json(blogs.into_iter().map(BlogView::from).collect()))
}

/// Publish a blog post.
///
/// POST /api/blogs
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateBlogRequest>, JsonRejection>,
) -> Result<Json<BlogView>> {
    let Json(request) = body?;
    if let Err(errors) = request.validate() {
        debug!(%errors, "Blog validation failed");
        return Err(errors.into());
    }

    let blog = state.storage().create_blog(request.into_new_blog()).await?;
    info!(id = %blog.id, "Blog created");
    Ok(Json(blog.into()))
}

/// Delete a blog post. Unknown or unparseable ids still succeed.
///
/// DELETE /api/blogs/{id}
#[instrument(skip(state))]
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode> {
    if let Some(id) = parse_leading_int(&id) {
        state.storage().delete_blog(BlogId::new(id)).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}
