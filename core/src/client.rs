//! Stateless HTTP request builder and response parser for the socionet API.
//!
//! # Design
//! `ApiClient` holds the base URL and an optional bearer token and carries no
//! mutable state between calls. Every backend operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`. The caller executes the round-trip, so
//! the core stays deterministic and free of I/O.
//!
//! All API requests include credentials (the cookie session) and carry
//! `content-type: application/json`, except the multipart video upload.
//! Pre-signed storage uploads bypass the API entirely; see
//! [`build_storage_upload`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, GENERIC_FAILURE_MESSAGE};
use crate::form::FormData;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
use crate::types::{
    AdminPostsResponse, AdminVideosResponse, CreatePost, CreateVideo, ImageUploadTarget,
    LoginRequest, MessageResponse, PostCategory, PostRefResponse, PostResponse, PostsResponse,
    ProgressResponse, ProgressUpdate, RegisterRequest, UpdatePost, UpdateUser, UpdateVideo,
    UploadTarget, UploadUrlRequest, UserResponse, UsersResponse, VideoDetailResponse,
    VideoRefResponse, VideosResponse,
};

const JSON: &str = "application/json";

/// Synchronous, stateless client for the socionet API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::from_config(ClientConfig::new(base_url))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let (base_url, token) = config.into_parts();
        Self { base_url, token }
    }

    /// Attach `Authorization: Bearer <token>` to every subsequent request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    // -----------------------------------------------------------------------
    // Auth
    // -----------------------------------------------------------------------

    pub fn build_login(&self, email: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let input = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.json_request(HttpMethod::Post, "/auth/login", &input)
    }

    pub fn build_register(&self, input: &RegisterRequest) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/auth/register", input)
    }

    pub fn build_logout(&self) -> HttpRequest {
        self.request(HttpMethod::Post, "/auth/logout")
    }

    pub fn build_me(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/auth/me")
    }

    pub fn parse_login(&self, response: HttpResponse) -> Result<Option<UserResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_register(
        &self,
        response: HttpResponse,
    ) -> Result<Option<MessageResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_logout(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    pub fn parse_me(&self, response: HttpResponse) -> Result<Option<UserResponse>, ApiError> {
        decode_response(response)
    }

    // -----------------------------------------------------------------------
    // Admin: users
    // -----------------------------------------------------------------------

    pub fn build_list_users(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/admin/users")
    }

    pub fn build_update_user(&self, id: &str, input: &UpdateUser) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Patch,
            &format!("/admin/users/{}", encode_segment(id)),
            input,
        )
    }

    pub fn build_delete_user(&self, id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Delete,
            &format!("/admin/users/{}", encode_segment(id)),
        )
    }

    pub fn parse_list_users(
        &self,
        response: HttpResponse,
    ) -> Result<Option<UsersResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_update_user(
        &self,
        response: HttpResponse,
    ) -> Result<Option<UserResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_delete_user(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    // -----------------------------------------------------------------------
    // Admin: videos
    // -----------------------------------------------------------------------

    pub fn build_create_upload_url(&self, file_path: &str) -> Result<HttpRequest, ApiError> {
        let input = UploadUrlRequest {
            file_path: file_path.to_string(),
        };
        self.json_request(HttpMethod::Post, "/admin/videos/upload-url", &input)
    }

    /// Multipart upload: the form's own content type replaces the JSON one.
    pub fn build_upload_video(&self, form: &FormData) -> HttpRequest {
        let mut request = self.bare_request(HttpMethod::Post, "/admin/videos/upload");
        request
            .headers
            .push(("content-type".to_string(), form.content_type()));
        request.body = Some(RequestBody::Multipart(form.encode()));
        request
    }

    pub fn build_create_video(&self, input: &CreateVideo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/admin/videos", input)
    }

    pub fn build_list_admin_videos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/admin/videos")
    }

    pub fn build_update_video(&self, id: &str, input: &UpdateVideo) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Patch,
            &format!("/admin/videos/{}", encode_segment(id)),
            input,
        )
    }

    pub fn build_delete_video(&self, id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Delete,
            &format!("/admin/videos/{}", encode_segment(id)),
        )
    }

    pub fn parse_create_upload_url(
        &self,
        response: HttpResponse,
    ) -> Result<Option<UploadTarget>, ApiError> {
        decode_response(response)
    }

    pub fn parse_upload_video(
        &self,
        response: HttpResponse,
    ) -> Result<Option<VideoRefResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_create_video(
        &self,
        response: HttpResponse,
    ) -> Result<Option<VideoRefResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_list_admin_videos(
        &self,
        response: HttpResponse,
    ) -> Result<Option<AdminVideosResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_update_video(
        &self,
        response: HttpResponse,
    ) -> Result<Option<VideoRefResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_delete_video(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    // -----------------------------------------------------------------------
    // Videos (viewer)
    // -----------------------------------------------------------------------

    pub fn build_get_video(&self, id: &str) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/videos/{}", encode_segment(id)))
    }

    pub fn build_list_videos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/videos")
    }

    pub fn build_update_video_progress(
        &self,
        id: &str,
        completed: bool,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Patch,
            &format!("/videos/{}/progress", encode_segment(id)),
            &ProgressUpdate { completed },
        )
    }

    pub fn parse_get_video(
        &self,
        response: HttpResponse,
    ) -> Result<Option<VideoDetailResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_list_videos(
        &self,
        response: HttpResponse,
    ) -> Result<Option<VideosResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_update_video_progress(
        &self,
        response: HttpResponse,
    ) -> Result<Option<ProgressResponse>, ApiError> {
        decode_response(response)
    }

    // -----------------------------------------------------------------------
    // Posts
    // -----------------------------------------------------------------------

    pub fn build_list_posts(&self, category: Option<PostCategory>) -> HttpRequest {
        let path = match category {
            Some(category) => format!("/posts?category={}", encode_segment(category.as_str())),
            None => "/posts".to_string(),
        };
        self.request(HttpMethod::Get, &path)
    }

    /// Fetching a post counts as a view unless `increment_view` is false.
    pub fn build_get_post(&self, id: &str, increment_view: bool) -> HttpRequest {
        let query = if increment_view { "" } else { "?increment=false" };
        self.request(
            HttpMethod::Get,
            &format!("/posts/{}{query}", encode_segment(id)),
        )
    }

    pub fn build_list_admin_posts(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/admin/posts")
    }

    pub fn build_create_post(&self, input: &CreatePost) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/admin/posts", input)
    }

    pub fn build_update_post(&self, id: &str, input: &UpdatePost) -> Result<HttpRequest, ApiError> {
        self.json_request(
            HttpMethod::Patch,
            &format!("/admin/posts/{}", encode_segment(id)),
            input,
        )
    }

    pub fn build_delete_post(&self, id: &str) -> HttpRequest {
        self.request(
            HttpMethod::Delete,
            &format!("/admin/posts/{}", encode_segment(id)),
        )
    }

    pub fn build_create_post_image_upload_url(
        &self,
        file_path: &str,
    ) -> Result<HttpRequest, ApiError> {
        let input = UploadUrlRequest {
            file_path: file_path.to_string(),
        };
        self.json_request(HttpMethod::Post, "/admin/posts/upload-url", &input)
    }

    pub fn parse_list_posts(
        &self,
        response: HttpResponse,
    ) -> Result<Option<PostsResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_get_post(&self, response: HttpResponse) -> Result<Option<PostResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_list_admin_posts(
        &self,
        response: HttpResponse,
    ) -> Result<Option<AdminPostsResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_create_post(
        &self,
        response: HttpResponse,
    ) -> Result<Option<PostRefResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_update_post(
        &self,
        response: HttpResponse,
    ) -> Result<Option<PostRefResponse>, ApiError> {
        decode_response(response)
    }

    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(response)
    }

    pub fn parse_create_post_image_upload_url(
        &self,
        response: HttpResponse,
    ) -> Result<Option<ImageUploadTarget>, ApiError> {
        decode_response(response)
    }

    // -----------------------------------------------------------------------
    // Request assembly
    // -----------------------------------------------------------------------

    /// Credentials plus the bearer token, if any. No content type.
    fn bare_request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = &self.token {
            headers.push(("authorization".to_string(), format!("Bearer {token}")));
        }
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body: None,
            include_credentials: true,
        }
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let mut request = self.bare_request(method, path);
        request
            .headers
            .insert(0, ("content-type".to_string(), JSON.to_string()));
        request
    }

    fn json_request<B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        input: &B,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut request = self.request(method, path);
        request.body = Some(RequestBody::Json(body));
        Ok(request)
    }
}

// ---------------------------------------------------------------------------
// Pre-signed storage uploads
// ---------------------------------------------------------------------------

/// Build the raw `PUT` to a pre-signed storage URL.
///
/// Storage is not the API: no JSON header, no bearer token, no cookies.
pub fn build_storage_upload(upload_url: &str, content_type: &str, bytes: Vec<u8>) -> HttpRequest {
    let content_type = if content_type.is_empty() {
        "application/octet-stream"
    } else {
        content_type
    };
    HttpRequest {
        method: HttpMethod::Put,
        path: upload_url.to_string(),
        headers: vec![("content-type".to_string(), content_type.to_string())],
        body: Some(RequestBody::Binary(bytes)),
        include_credentials: false,
    }
}

/// Storage answers are plain text, so the whole body becomes the message.
pub fn parse_storage_upload(response: HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let details = response.body.trim();
    let message = if details.is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        details.to_string()
    };
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}

// ---------------------------------------------------------------------------
// Response decoding
// ---------------------------------------------------------------------------

/// Decode a response into `T`.
///
/// Non-2xx statuses become `ApiError::Http`. A 204, or an empty body on any
/// success status, yields `Ok(None)` without attempting JSON parsing.
pub fn decode_response<T: DeserializeOwned>(response: HttpResponse) -> Result<Option<T>, ApiError> {
    check_status(&response)?;
    if response.status == 204 || response.body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(&response.body)
        .map(Some)
        .map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// Success ignores whatever body the server sent.
fn parse_empty(response: HttpResponse) -> Result<(), ApiError> {
    check_status(&response)
}

/// Map non-success status codes to `ApiError::Http`, lifting the `message`
/// field out of a JSON body when there is one.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        status: response.status,
        message: failure_message(&response.body),
    })
}

fn failure_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| match value.get("message") {
            Some(serde_json::Value::String(message)) if !message.is_empty() => {
                Some(message.clone())
            }
            _ => None,
        })
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b'_' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, UserStatus};

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse::new(status, body)
    }

    #[test]
    fn build_login_produces_correct_request() {
        let req = client().build_login("user@example.com", "secret").unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/auth/login");
        assert_eq!(req.header("content-type"), Some("application/json"));
        assert!(req.include_credentials);
        let body: serde_json::Value =
            serde_json::from_str(req.body.as_ref().and_then(RequestBody::as_json).unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"email": "user@example.com", "password": "secret"})
        );
    }

    #[test]
    fn parse_login_returns_session_user() {
        let resp = response(200, r#"{"user":{"role":"ADMIN","status":"APPROVED"}}"#);
        let parsed = client().parse_login(resp).unwrap().unwrap();
        assert_eq!(parsed.user.role, Role::Admin);
        assert_eq!(parsed.user.status, UserStatus::Approved);
    }

    #[test]
    fn parse_login_surfaces_server_message() {
        let resp = response(401, r#"{"message":"Invalid credentials"}"#);
        let err = client().parse_login(resp).unwrap_err();
        match err {
            ApiError::Http { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid credentials");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failure_without_message_uses_generic_text() {
        for body in ["", "oops", r#"{"error":"x"}"#, r#"{"message":""}"#, r#"{"message":3}"#] {
            let err = client().parse_me(response(500, body)).unwrap_err();
            assert!(
                matches!(&err, ApiError::Http { status: 500, message } if message == GENERIC_FAILURE_MESSAGE),
                "body {body:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn token_adds_bearer_header() {
        let req = client().with_token("abc").build_me();
        assert_eq!(req.header("authorization"), Some("Bearer abc"));
    }

    #[test]
    fn no_token_means_no_authorization_header() {
        let req = client().build_list_users();
        assert!(req.header("authorization").is_none());
        assert!(req.include_credentials);
    }

    #[test]
    fn every_api_request_includes_credentials() {
        let c = client();
        let requests = vec![
            c.build_logout(),
            c.build_me(),
            c.build_list_users(),
            c.build_delete_user("u1"),
            c.build_list_admin_videos(),
            c.build_delete_video("v1"),
            c.build_get_video("v1"),
            c.build_list_videos(),
            c.build_list_posts(None),
            c.build_get_post("p1", true),
            c.build_list_admin_posts(),
            c.build_delete_post("p1"),
            c.build_upload_video(&FormData::with_boundary("b")),
        ];
        assert!(requests.iter().all(|req| req.include_credentials));
    }

    #[test]
    fn list_posts_filters_by_category() {
        let req = client().build_list_posts(Some(PostCategory::Notice));
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/posts?category=NOTICE");
        assert!(req.body.is_none());

        let req = client().build_list_posts(None);
        assert_eq!(req.path, "http://localhost:3000/posts");
    }

    #[test]
    fn get_post_can_suppress_view_increment() {
        assert_eq!(
            client().build_get_post("p1", true).path,
            "http://localhost:3000/posts/p1"
        );
        assert_eq!(
            client().build_get_post("p1", false).path,
            "http://localhost:3000/posts/p1?increment=false"
        );
    }

    #[test]
    fn update_user_patches_only_given_fields() {
        let input = UpdateUser {
            status: None,
            role: Some(Role::Advanced),
        };
        let req = client().build_update_user("u1", &input).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:3000/admin/users/u1");
        let body: serde_json::Value =
            serde_json::from_str(req.body.as_ref().and_then(RequestBody::as_json).unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"role": "ADVANCED"}));
    }

    #[test]
    fn delete_user_accepts_no_content() {
        assert!(client().parse_delete_user(response(204, "")).is_ok());
    }

    #[test]
    fn delete_user_ignores_a_body_on_success() {
        assert!(client().parse_delete_user(response(200, r#"{"ok":true}"#)).is_ok());
    }

    #[test]
    fn delete_user_not_found() {
        let err = client()
            .parse_delete_user(response(404, r#"{"message":"User not found"}"#))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: User not found");
    }

    #[test]
    fn upload_video_is_multipart_without_json_header() {
        let form = FormData::with_boundary("XYZ").text("title", "Intro");
        let req = client().with_token("t").build_upload_video(&form);
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/admin/videos/upload");
        assert_eq!(
            req.header("content-type"),
            Some("multipart/form-data; boundary=XYZ")
        );
        assert!(req
            .headers
            .iter()
            .all(|(_, value)| value != "application/json"));
        assert_eq!(req.header("authorization"), Some("Bearer t"));
        assert!(matches!(req.body, Some(RequestBody::Multipart(_))));
    }

    #[test]
    fn parse_upload_video_returns_reference() {
        let parsed = client()
            .parse_upload_video(response(201, r#"{"video":{"id":"v9"}}"#))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.video.id, "v9");
    }

    #[test]
    fn empty_success_body_is_an_empty_result() {
        let decoded: Option<serde_json::Value> = decode_response(response(200, "")).unwrap();
        assert!(decoded.is_none());
        let decoded: Option<serde_json::Value> = decode_response(response(204, "ignored")).unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn typed_operations_accept_an_empty_answer() {
        let c = client();
        assert!(c.parse_me(response(200, "")).unwrap().is_none());
        assert!(c.parse_login(response(200, "")).unwrap().is_none());
        assert!(c.parse_update_user(response(204, "")).unwrap().is_none());
        assert!(c.parse_upload_video(response(200, "")).unwrap().is_none());
        assert!(c.parse_get_post(response(204, "ignored")).unwrap().is_none());
    }

    #[test]
    fn malformed_success_body_is_a_decode_error() {
        let err = client().parse_list_posts(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn progress_update_targets_video() {
        let req = client().build_update_video_progress("v1", true).unwrap();
        assert_eq!(req.method, HttpMethod::Patch);
        assert_eq!(req.path, "http://localhost:3000/videos/v1/progress");
        assert_eq!(
            req.body.as_ref().and_then(RequestBody::as_json),
            Some(r#"{"completed":true}"#)
        );
    }

    #[test]
    fn upload_url_requests_send_file_path() {
        let c = client();
        let req = c.build_create_upload_url("videos/a.mp4").unwrap();
        assert_eq!(req.path, "http://localhost:3000/admin/videos/upload-url");
        assert_eq!(
            req.body.as_ref().and_then(RequestBody::as_json),
            Some(r#"{"filePath":"videos/a.mp4"}"#)
        );

        let req = c.build_create_post_image_upload_url("posts/1-a.png").unwrap();
        assert_eq!(req.path, "http://localhost:3000/admin/posts/upload-url");
    }

    #[test]
    fn ids_are_percent_encoded() {
        let req = client().build_get_video("a/b c");
        assert_eq!(req.path, "http://localhost:3000/videos/a%2Fb%20c");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ApiClient::new("http://localhost:3000/");
        assert_eq!(client.build_me().path, "http://localhost:3000/auth/me");
    }

    #[test]
    fn config_token_carries_over() {
        let client = ApiClient::from_config(ClientConfig::new("http://h/").with_token("cfg"));
        assert_eq!(client.base_url(), "http://h");
        assert_eq!(client.token(), Some("cfg"));
        assert_eq!(client.build_me().header("authorization"), Some("Bearer cfg"));
    }

    #[test]
    fn storage_upload_is_raw_and_anonymous() {
        let req = build_storage_upload("https://store/put?sig=1", "image/png", vec![1, 2, 3]);
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.path, "https://store/put?sig=1");
        assert_eq!(req.header("content-type"), Some("image/png"));
        assert!(req.header("authorization").is_none());
        assert!(!req.include_credentials);
        assert_eq!(req.body, Some(RequestBody::Binary(vec![1, 2, 3])));

        let req = build_storage_upload("https://store/put", "", Vec::new());
        assert_eq!(req.header("content-type"), Some("application/octet-stream"));
    }

    #[test]
    fn storage_failure_uses_body_text() {
        let err = parse_storage_upload(response(403, "SignatureDoesNotMatch")).unwrap_err();
        assert!(
            matches!(err, ApiError::Http { status: 403, ref message } if message == "SignatureDoesNotMatch")
        );
        assert!(parse_storage_upload(response(200, "")).is_ok());
    }
}
