//! One call per backend operation: build, execute, parse.
//!
//! `Backend` pairs an `ApiClient` with a `Transport` for hosts that do not
//! need to see the intermediate `HttpRequest`/`HttpResponse` values. It adds
//! no retries and no caching; errors propagate unchanged.

use tracing::{debug, warn};

use crate::client::{build_storage_upload, parse_storage_upload, ApiClient};
use crate::error::ApiError;
use crate::form::FormData;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{
    AdminPostsResponse, AdminVideosResponse, CreatePost, CreateVideo, ImageUploadTarget,
    MessageResponse, PostCategory, PostRefResponse, PostResponse, PostsResponse,
    ProgressResponse, RegisterRequest, UpdatePost, UpdateUser, UpdateVideo, UploadTarget,
    UserResponse, UsersResponse, VideoDetailResponse, VideoRefResponse, VideosResponse,
};

#[derive(Debug, Clone)]
pub struct Backend<T> {
    client: ApiClient,
    transport: T,
}

impl<T: Transport> Backend<T> {
    pub fn new(client: ApiClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn exchange(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let method = request.method.as_str();
        debug!(method, url = %request.path, "sending request");
        let response = self.transport.execute(&request).inspect_err(|e| {
            warn!(method, url = %request.path, error = %e, "transport failure");
        })?;
        if response.is_success() {
            debug!(method, url = %request.path, status = response.status, "response received");
        } else {
            warn!(method, url = %request.path, status = response.status, "request rejected");
        }
        Ok(response)
    }

    // --- auth ---

    pub fn login(&self, email: &str, password: &str) -> Result<Option<UserResponse>, ApiError> {
        let response = self.exchange(self.client.build_login(email, password)?)?;
        self.client.parse_login(response)
    }

    pub fn register(&self, input: &RegisterRequest) -> Result<Option<MessageResponse>, ApiError> {
        let response = self.exchange(self.client.build_register(input)?)?;
        self.client.parse_register(response)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        let response = self.exchange(self.client.build_logout())?;
        self.client.parse_logout(response)
    }

    pub fn me(&self) -> Result<Option<UserResponse>, ApiError> {
        let response = self.exchange(self.client.build_me())?;
        self.client.parse_me(response)
    }

    // --- admin: users ---

    pub fn list_users(&self) -> Result<Option<UsersResponse>, ApiError> {
        let response = self.exchange(self.client.build_list_users())?;
        self.client.parse_list_users(response)
    }

    pub fn update_user(
        &self,
        id: &str,
        input: &UpdateUser,
    ) -> Result<Option<UserResponse>, ApiError> {
        let response = self.exchange(self.client.build_update_user(id, input)?)?;
        self.client.parse_update_user(response)
    }

    pub fn delete_user(&self, id: &str) -> Result<(), ApiError> {
        let response = self.exchange(self.client.build_delete_user(id))?;
        self.client.parse_delete_user(response)
    }

    // --- admin: videos ---

    pub fn create_upload_url(&self, file_path: &str) -> Result<Option<UploadTarget>, ApiError> {
        let response = self.exchange(self.client.build_create_upload_url(file_path)?)?;
        self.client.parse_create_upload_url(response)
    }

    pub fn upload_video(&self, form: &FormData) -> Result<Option<VideoRefResponse>, ApiError> {
        let response = self.exchange(self.client.build_upload_video(form))?;
        self.client.parse_upload_video(response)
    }

    pub fn create_video(&self, input: &CreateVideo) -> Result<Option<VideoRefResponse>, ApiError> {
        let response = self.exchange(self.client.build_create_video(input)?)?;
        self.client.parse_create_video(response)
    }

    pub fn list_admin_videos(&self) -> Result<Option<AdminVideosResponse>, ApiError> {
        let response = self.exchange(self.client.build_list_admin_videos())?;
        self.client.parse_list_admin_videos(response)
    }

    pub fn update_video(
        &self,
        id: &str,
        input: &UpdateVideo,
    ) -> Result<Option<VideoRefResponse>, ApiError> {
        let response = self.exchange(self.client.build_update_video(id, input)?)?;
        self.client.parse_update_video(response)
    }

    pub fn delete_video(&self, id: &str) -> Result<(), ApiError> {
        let response = self.exchange(self.client.build_delete_video(id))?;
        self.client.parse_delete_video(response)
    }

    // --- videos ---

    pub fn get_video(&self, id: &str) -> Result<Option<VideoDetailResponse>, ApiError> {
        let response = self.exchange(self.client.build_get_video(id))?;
        self.client.parse_get_video(response)
    }

    pub fn list_videos(&self) -> Result<Option<VideosResponse>, ApiError> {
        let response = self.exchange(self.client.build_list_videos())?;
        self.client.parse_list_videos(response)
    }

    pub fn update_video_progress(
        &self,
        id: &str,
        completed: bool,
    ) -> Result<Option<ProgressResponse>, ApiError> {
        let response = self.exchange(self.client.build_update_video_progress(id, completed)?)?;
        self.client.parse_update_video_progress(response)
    }

    // --- posts ---

    pub fn list_posts(
        &self,
        category: Option<PostCategory>,
    ) -> Result<Option<PostsResponse>, ApiError> {
        let response = self.exchange(self.client.build_list_posts(category))?;
        self.client.parse_list_posts(response)
    }

    pub fn get_post(
        &self,
        id: &str,
        increment_view: bool,
    ) -> Result<Option<PostResponse>, ApiError> {
        let response = self.exchange(self.client.build_get_post(id, increment_view))?;
        self.client.parse_get_post(response)
    }

    pub fn list_admin_posts(&self) -> Result<Option<AdminPostsResponse>, ApiError> {
        let response = self.exchange(self.client.build_list_admin_posts())?;
        self.client.parse_list_admin_posts(response)
    }

    pub fn create_post(&self, input: &CreatePost) -> Result<Option<PostRefResponse>, ApiError> {
        let response = self.exchange(self.client.build_create_post(input)?)?;
        self.client.parse_create_post(response)
    }

    pub fn update_post(
        &self,
        id: &str,
        input: &UpdatePost,
    ) -> Result<Option<PostRefResponse>, ApiError> {
        let response = self.exchange(self.client.build_update_post(id, input)?)?;
        self.client.parse_update_post(response)
    }

    pub fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        let response = self.exchange(self.client.build_delete_post(id))?;
        self.client.parse_delete_post(response)
    }

    pub fn create_post_image_upload_url(
        &self,
        file_path: &str,
    ) -> Result<Option<ImageUploadTarget>, ApiError> {
        let response = self.exchange(self.client.build_create_post_image_upload_url(file_path)?)?;
        self.client.parse_create_post_image_upload_url(response)
    }

    // --- storage ---

    /// PUT `bytes` to a pre-signed URL obtained from one of the
    /// `create_*upload_url` calls.
    pub fn upload_to_storage(
        &self,
        upload_url: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ApiError> {
        let response = self.exchange(build_storage_upload(upload_url, content_type, bytes))?;
        parse_storage_upload(response)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::http::HttpMethod;
    use crate::types::Role;

    /// Replays canned responses and records every request it sees.
    struct Scripted {
        responses: Mutex<Vec<HttpResponse>>,
        seen: Mutex<Vec<HttpRequest>>,
    }

    impl Scripted {
        fn new(responses: Vec<HttpResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().rev().collect()),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for Scripted {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.seen.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ApiError::Transport("no scripted response".into()))
        }
    }

    fn backend(responses: Vec<HttpResponse>) -> Backend<Scripted> {
        Backend::new(ApiClient::new("http://api.test"), Scripted::new(responses))
    }

    #[test]
    fn login_returns_user_envelope() {
        let b = backend(vec![HttpResponse::new(
            200,
            r#"{"user":{"role":"ADMIN","status":"APPROVED"}}"#,
        )]);
        let parsed = b.login("user@example.com", "secret").unwrap().unwrap();
        assert_eq!(parsed.user.role, Role::Admin);

        let seen = b.transport().seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].path, "http://api.test/auth/login");
    }

    #[test]
    fn transport_failures_propagate_unchanged() {
        let b = backend(Vec::new());
        let err = b.me().unwrap_err();
        assert!(matches!(&err, ApiError::Transport(_)));
        assert_eq!(err.to_string(), "transport failed: no scripted response");
    }

    #[test]
    fn empty_answers_are_empty_results() {
        let b = backend(vec![
            HttpResponse::new(204, ""),
            HttpResponse::new(200, ""),
            HttpResponse::new(201, ""),
        ]);
        assert!(b.update_user("u1", &UpdateUser::default()).unwrap().is_none());
        assert!(b.list_posts(None).unwrap().is_none());
        let form = FormData::with_boundary("b").text("title", "Intro");
        assert!(b.upload_video(&form).unwrap().is_none());
    }

    #[test]
    fn delete_resolves_on_no_content() {
        let b = backend(vec![HttpResponse::new(204, "")]);
        b.delete_user("u1").unwrap();
        let seen = b.transport().seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Delete);
        assert_eq!(seen[0].path, "http://api.test/admin/users/u1");
    }

    #[test]
    fn storage_upload_skips_api_headers() {
        let b = Backend::new(
            ApiClient::new("http://api.test").with_token("tok"),
            Scripted::new(vec![HttpResponse::new(200, "")]),
        );
        b.upload_to_storage("https://bucket.test/obj?sig=x", "video/mp4", vec![7])
            .unwrap();
        let seen = b.transport().seen.lock().unwrap();
        assert_eq!(seen[0].method, HttpMethod::Put);
        assert!(seen[0].header("authorization").is_none());
        assert!(!seen[0].include_credentials);
    }
}
