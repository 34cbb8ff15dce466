//! Viewer-facing video catalogue. Only approved accounts get in, and each
//! account sees the published videos its role can view.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::error::MockError;
use crate::models::{ProgressInput, Video, VideoDetail};
use crate::store::{origin, Db};

pub async fn list_videos(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, MockError> {
    let store = db.read().await;
    let user = store.require_approved(&headers)?;
    let mut videos: Vec<Video> = store
        .videos
        .values()
        .filter(|video| video.is_published && user.role.can_view(video.required_role))
        .map(|video| Video {
            id: video.id.clone(),
            title: video.title.clone(),
            description: video.description.clone(),
            required_role: video.required_role,
            is_published: video.is_published,
            duration_seconds: video.duration_seconds,
            completed: store
                .completed
                .contains(&(user.id.clone(), video.id.clone())),
        })
        .collect();
    videos.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
    Ok(Json(json!({ "videos": videos })))
}

pub async fn get_video(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, MockError> {
    let store = db.read().await;
    let user = store.require_approved(&headers)?;
    let video = store
        .videos
        .get(&id)
        .filter(|video| video.is_published)
        .cloned()
        .ok_or(MockError::NotFound("Video not found"))?;
    if !user.role.can_view(video.required_role) {
        return Err(MockError::Forbidden("Your role cannot view this video"));
    }
    let completed = store.completed.contains(&(user.id.clone(), video.id.clone()));
    let signed_url = store.sign_download(&origin(&headers), &video.storage_path);
    let detail = VideoDetail {
        id: video.id,
        title: video.title,
        signed_url,
        required_role: video.required_role,
        duration_seconds: video.duration_seconds,
        completed,
    };
    Ok(Json(json!({ "video": detail })))
}

pub async fn update_progress(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(input): Json<ProgressInput>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    let user = store.require_approved(&headers)?;
    let visible = store
        .videos
        .get(&id)
        .is_some_and(|video| video.is_published && user.role.can_view(video.required_role));
    if !visible {
        return Err(MockError::NotFound("Video not found"));
    }
    let key = (user.id, id.clone());
    if input.completed {
        store.completed.insert(key);
    } else {
        store.completed.remove(&key);
    }
    Ok(Json(json!({
        "progress": { "videoId": id, "completed": input.completed }
    })))
}
