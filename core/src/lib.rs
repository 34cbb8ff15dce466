//! API client core for the socionet institute backend.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Auth, admin user/video/post
//! management, the viewer video catalogue, the public post board and the
//! pre-signed upload flow are all covered.
//!
//! # Design
//! - `ApiClient` is stateless. It holds only the base URL and an optional
//!   bearer token.
//! - Each operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit. `Backend` glues the two around a `Transport` for
//!   hosts that just want one call per operation.
//! - Non-2xx answers surface uniformly as `ApiError::Http { status, message }`.
//! - `SessionProvider` is the single place that remembers who is logged in.

pub mod backend;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod session;
pub mod transport;
pub mod types;

pub use backend::Backend;
pub use client::{build_storage_upload, decode_response, parse_storage_upload, ApiClient};
pub use config::ClientConfig;
pub use error::ApiError;
pub use form::{FormData, UploadFile, VideoUpload};
pub use http::{HttpMethod, HttpRequest, HttpResponse, RequestBody};
pub use session::{AuthStatus, SessionProvider};
pub use transport::Transport;
#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
pub use types::{PostCategory, Role, SessionUser, UserStatus};
