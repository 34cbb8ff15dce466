//! Public post board.

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::MockError;
use crate::models::{Category, Post};
use crate::store::Db;

#[derive(Deserialize)]
pub struct ListQuery {
    pub category: Option<Category>,
}

#[derive(Deserialize)]
pub struct GetQuery {
    pub increment: Option<bool>,
}

/// Published posts, pinned first, newest first within each group.
pub async fn list_posts(
    State(db): State<Db>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    let store = db.read().await;
    let mut posts: Vec<Post> = store
        .posts
        .values()
        .filter(|post| post.is_published)
        .filter(|post| query.category.map_or(true, |category| post.category == category))
        .map(Post::from)
        .collect();
    posts.sort_by(|a, b| {
        b.is_pinned
            .cmp(&a.is_pinned)
            .then_with(|| b.published_at.cmp(&a.published_at))
            .then_with(|| a.id.cmp(&b.id))
    });
    Json(json!({ "posts": posts }))
}

/// Counts a view unless `?increment=false`.
pub async fn get_post(
    State(db): State<Db>,
    Path(id): Path<String>,
    Query(query): Query<GetQuery>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    let post = store
        .posts
        .get_mut(&id)
        .filter(|post| post.is_published)
        .ok_or(MockError::NotFound("Post not found"))?;
    if query.increment.unwrap_or(true) {
        post.views += 1;
    }
    Ok(Json(json!({ "post": Post::from(&*post) })))
}
