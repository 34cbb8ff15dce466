//! `/admin/*` routes. Every handler checks for an admin session first.

use axum::{
    extract::{Multipart, Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::error::MockError;
use crate::models::{
    AdminPost, AdminUser, AdminVideo, CreatePostInput, CreateVideoInput, PostRecord, Role,
    UpdatePostInput, UpdateUserInput, UpdateVideoInput, UploadUrlInput, User, VideoRecord,
};
use crate::store::{origin, Db};

// --- users ---

pub async fn list_users(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, MockError> {
    let store = db.read().await;
    store.require_admin(&headers)?;
    let mut users: Vec<AdminUser> = store.users.values().map(AdminUser::from).collect();
    users.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.email.cmp(&b.email)));
    Ok(Json(json!({ "users": users })))
}

pub async fn update_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<UpdateUserInput>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    let user = store
        .users
        .get_mut(&id)
        .ok_or(MockError::NotFound("User not found"))?;
    if let Some(status) = input.status {
        user.status = status;
    }
    if let Some(role) = input.role {
        user.role = role;
    }
    Ok(Json(json!({ "user": User::from(&*user) })))
}

pub async fn delete_user(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    store
        .users
        .remove(&id)
        .ok_or(MockError::NotFound("User not found"))?;
    store.sessions.retain(|_, user_id| *user_id != id);
    store.completed.retain(|(user_id, _)| *user_id != id);
    Ok(StatusCode::NO_CONTENT)
}

// --- videos ---

pub async fn create_video_upload_url(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UploadUrlInput>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    let path = non_empty_path(&input.file_path)?;
    let upload_url = store.sign_upload(&origin(&headers), &path);
    Ok(Json(json!({ "uploadUrl": upload_url, "path": path })))
}

/// Multipart form with `file`, `title`, `description`, `requiredRole` and
/// `isPublished`. The file lands in storage under `videos/`.
pub async fn upload_video(
    State(db): State<Db>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, MockError> {
    db.read().await.require_admin(&headers)?;

    let mut file: Option<(String, Vec<u8>)> = None;
    let mut title = None;
    let mut description = None;
    let mut required_role = Role::Beginner;
    let mut is_published = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MockError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let file_name = field.file_name().unwrap_or("video").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| MockError::BadRequest(e.to_string()))?;
            file = Some((file_name, bytes.to_vec()));
            continue;
        }
        let value = field
            .text()
            .await
            .map_err(|e| MockError::BadRequest(e.to_string()))?;
        match name.as_str() {
            "title" => title = Some(value),
            "description" if !value.is_empty() => description = Some(value),
            "requiredRole" => {
                required_role = Role::parse(&value)
                    .ok_or_else(|| MockError::BadRequest(format!("Unknown role {value}")))?
            }
            "isPublished" => is_published = value == "true",
            _ => {}
        }
    }

    let (file_name, bytes) =
        file.ok_or_else(|| MockError::BadRequest("File is required".to_string()))?;
    let title = title
        .filter(|title| !title.trim().is_empty())
        .ok_or_else(|| MockError::BadRequest("Title is required".to_string()))?;

    let id = Uuid::new_v4().to_string();
    let storage_path = format!("videos/{id}-{}", sanitize(&file_name));
    let video = VideoRecord {
        id: id.clone(),
        title,
        description,
        required_role,
        storage_path: storage_path.clone(),
        is_published,
        duration_seconds: None,
        created_at: Utc::now(),
    };

    let mut store = db.write().await;
    store.objects.insert(storage_path, bytes);
    store.videos.insert(id.clone(), video);
    Ok((StatusCode::CREATED, Json(json!({ "video": { "id": id } }))))
}

pub async fn create_video(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreateVideoInput>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    let video = VideoRecord {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        description: input.description,
        required_role: input.required_role,
        storage_path: non_empty_path(&input.storage_path)?,
        is_published: input.is_published.unwrap_or(false),
        duration_seconds: input.duration_seconds,
        created_at: Utc::now(),
    };
    let id = video.id.clone();
    store.videos.insert(id.clone(), video);
    Ok((StatusCode::CREATED, Json(json!({ "video": { "id": id } }))))
}

pub async fn list_videos(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, MockError> {
    let store = db.read().await;
    store.require_admin(&headers)?;
    let mut videos: Vec<AdminVideo> = store.videos.values().map(AdminVideo::from).collect();
    videos.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(Json(json!({ "videos": videos })))
}

pub async fn update_video(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<UpdateVideoInput>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    let video = store
        .videos
        .get_mut(&id)
        .ok_or(MockError::NotFound("Video not found"))?;
    if let Some(title) = input.title {
        video.title = title;
    }
    if let Some(description) = input.description {
        video.description = Some(description);
    }
    if let Some(role) = input.required_role {
        video.required_role = role;
    }
    if let Some(is_published) = input.is_published {
        video.is_published = is_published;
    }
    if let Some(duration) = input.duration_seconds {
        video.duration_seconds = duration;
    }
    Ok(Json(json!({ "video": { "id": id } })))
}

pub async fn delete_video(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    let video = store
        .videos
        .remove(&id)
        .ok_or(MockError::NotFound("Video not found"))?;
    store.objects.remove(&video.storage_path);
    store.completed.retain(|(_, video_id)| *video_id != id);
    Ok(StatusCode::NO_CONTENT)
}

// --- posts ---

pub async fn list_posts(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, MockError> {
    let store = db.read().await;
    store.require_admin(&headers)?;
    let mut posts: Vec<AdminPost> = store.posts.values().map(AdminPost::from).collect();
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
    Ok(Json(json!({ "posts": posts })))
}

pub async fn create_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<CreatePostInput>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    if input.title.trim().is_empty() {
        return Err(MockError::BadRequest("Title is required".to_string()));
    }
    let now = Utc::now();
    let post = PostRecord {
        id: Uuid::new_v4().to_string(),
        title: input.title,
        content: input.content,
        category: input.category,
        is_pinned: input.is_pinned.unwrap_or(false),
        is_published: true,
        views: 0,
        published_at: now,
        created_at: now,
    };
    let id = post.id.clone();
    store.posts.insert(id.clone(), post);
    Ok((StatusCode::CREATED, Json(json!({ "post": { "id": id } }))))
}

pub async fn update_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<UpdatePostInput>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    let post = store
        .posts
        .get_mut(&id)
        .ok_or(MockError::NotFound("Post not found"))?;
    if let Some(title) = input.title {
        post.title = title;
    }
    if let Some(content) = input.content {
        post.content = Some(content);
    }
    if let Some(category) = input.category {
        post.category = category;
    }
    if let Some(is_pinned) = input.is_pinned {
        post.is_pinned = is_pinned;
    }
    Ok(Json(json!({ "post": { "id": id } })))
}

pub async fn delete_post(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    store
        .posts
        .remove(&id)
        .ok_or(MockError::NotFound("Post not found"))?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_post_image_upload_url(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<UploadUrlInput>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    store.require_admin(&headers)?;
    let path = non_empty_path(&input.file_path)?;
    let origin = origin(&headers);
    let upload_url = store.sign_upload(&origin, &path);
    let public_url = format!("{origin}/storage/{path}");
    Ok(Json(json!({
        "uploadUrl": upload_url,
        "publicUrl": public_url,
        "path": path,
    })))
}

fn non_empty_path(path: &str) -> Result<String, MockError> {
    let path = path.trim().trim_start_matches('/');
    if path.is_empty() {
        return Err(MockError::BadRequest("filePath is required".to_string()));
    }
    Ok(path.to_string())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}
