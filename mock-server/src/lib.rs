//! In-memory stand-in for the socionet backend.
//!
//! Serves the same routes as the real service: cookie or bearer sessions,
//! admin approval of registrations, role-gated videos, the post board, and a
//! tiny object store behind pre-signed URLs. Every `app()` starts from a
//! fresh store holding one approved admin (`ADMIN_EMAIL` / `ADMIN_PASSWORD`).

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;

mod admin;
mod auth;
pub mod error;
pub mod models;
mod posts;
mod storage;
pub mod store;
mod videos;

pub use models::{AdminPost, AdminUser, AdminVideo, Category, Post, Role, User, UserStatus, Video, VideoDetail};
pub use store::{Db, Store, ADMIN_EMAIL, ADMIN_PASSWORD, SESSION_COOKIE};

pub fn app() -> Router {
    app_with_store(Store::seeded())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
        .route("/admin/users", get(admin::list_users))
        .route(
            "/admin/users/{id}",
            patch(admin::update_user).delete(admin::delete_user),
        )
        .route("/admin/videos/upload-url", post(admin::create_video_upload_url))
        .route("/admin/videos/upload", post(admin::upload_video))
        .route(
            "/admin/videos",
            get(admin::list_videos).post(admin::create_video),
        )
        .route(
            "/admin/videos/{id}",
            patch(admin::update_video).delete(admin::delete_video),
        )
        .route(
            "/admin/posts/upload-url",
            post(admin::create_post_image_upload_url),
        )
        .route("/admin/posts", get(admin::list_posts).post(admin::create_post))
        .route(
            "/admin/posts/{id}",
            patch(admin::update_post).delete(admin::delete_post),
        )
        .route("/videos", get(videos::list_videos))
        .route("/videos/{id}", get(videos::get_video))
        .route("/videos/{id}/progress", patch(videos::update_progress))
        .route("/posts", get(posts::list_posts))
        .route("/posts/{id}", get(posts::get_post))
        .route(
            "/storage/{*path}",
            get(storage::get_object).put(storage::put_object),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}
