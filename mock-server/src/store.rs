//! In-memory backend state plus the credential checks every handler shares.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use axum::http::{header, HeaderMap};
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::MockError;
use crate::models::{PostRecord, Role, UserRecord, UserStatus, VideoRecord};

pub const SESSION_COOKIE: &str = "session";
pub const ADMIN_EMAIL: &str = "admin@socionet.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

#[derive(Default)]
pub struct Store {
    pub users: HashMap<String, UserRecord>,
    /// session token -> user id
    pub sessions: HashMap<String, String>,
    pub videos: HashMap<String, VideoRecord>,
    /// (user id, video id) pairs marked completed
    pub completed: HashSet<(String, String)>,
    pub posts: HashMap<String, PostRecord>,
    /// storage path -> signature accepted for a PUT
    pub signatures: HashMap<String, String>,
    pub objects: HashMap<String, Vec<u8>>,
}

pub type Db = Arc<RwLock<Store>>;

impl Store {
    /// A store holding a single approved admin.
    pub fn seeded() -> Self {
        let mut store = Store::default();
        let admin = UserRecord {
            id: Uuid::new_v4().to_string(),
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
            name: Some("Administrator".to_string()),
            phone: None,
            role: Role::Admin,
            status: UserStatus::Approved,
            created_at: Utc::now(),
        };
        store.users.insert(admin.id.clone(), admin);
        store
    }

    pub fn find_by_email(&self, email: &str) -> Option<&UserRecord> {
        self.users
            .values()
            .find(|user| user.email.eq_ignore_ascii_case(email))
    }

    pub fn open_session(&mut self, user_id: &str) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), user_id.to_string());
        token
    }

    /// Resolve the caller from a bearer token, falling back to the session
    /// cookie.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<UserRecord, MockError> {
        let token = session_token(headers).ok_or(MockError::Unauthorized)?;
        self.sessions
            .get(&token)
            .and_then(|user_id| self.users.get(user_id))
            .cloned()
            .ok_or(MockError::Unauthorized)
    }

    pub fn require_admin(&self, headers: &HeaderMap) -> Result<UserRecord, MockError> {
        let user = self.authenticate(headers)?;
        if user.role != Role::Admin {
            return Err(MockError::Forbidden("Admin access required"));
        }
        Ok(user)
    }

    pub fn require_approved(&self, headers: &HeaderMap) -> Result<UserRecord, MockError> {
        let user = self.authenticate(headers)?;
        if user.status != UserStatus::Approved {
            return Err(MockError::Forbidden("Account is not approved"));
        }
        Ok(user)
    }

    /// Issue a one-off signature for a storage write and return the URL.
    pub fn sign_upload(&mut self, origin: &str, path: &str) -> String {
        let signature = Uuid::new_v4().simple().to_string();
        self.signatures.insert(path.to_string(), signature.clone());
        format!("{origin}/storage/{path}?signature={signature}")
    }

    /// A playback URL. Reads are not signature-checked, so nothing is stored.
    pub fn sign_download(&self, origin: &str, path: &str) -> String {
        let token = Uuid::new_v4().simple();
        format!("{origin}/storage/{path}?token={token}")
    }
}

/// The session token from `Authorization: Bearer` or the session cookie.
pub fn session_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string);
    bearer.or_else(|| {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.to_string())
    })
}

/// `http://<host>` as the caller addressed us.
pub fn origin(headers: &HeaderMap) -> String {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{host}")
}
