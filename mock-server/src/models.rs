use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Beginner,
    Intermediate,
    Advanced,
    Instructor,
    Admin,
}

impl Role {
    pub fn parse(value: &str) -> Option<Role> {
        serde_json::from_value(serde_json::Value::String(value.to_string())).ok()
    }

    pub fn can_view(self, required: Role) -> bool {
        self == Role::Admin || self == required
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Notice,
    Activity,
}

// ---------------------------------------------------------------------------
// Stored records
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct VideoRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub required_role: Role,
    pub storage_path: String,
    pub is_published: bool,
    pub duration_seconds: Option<u32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub content: Option<String>,
    pub category: Category,
    pub is_pinned: bool,
    pub is_published: bool,
    pub views: u64,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
}

#[derive(Deserialize)]
pub struct UpdateUserInput {
    pub status: Option<UserStatus>,
    pub role: Option<Role>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadUrlInput {
    pub file_path: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoInput {
    pub title: String,
    pub description: Option<String>,
    pub storage_path: String,
    pub required_role: Role,
    pub is_published: Option<bool>,
    pub duration_seconds: Option<u32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_role: Option<Role>,
    pub is_published: Option<bool>,
    /// `null` clears the duration; an absent field leaves it alone.
    #[serde(default, deserialize_with = "present")]
    pub duration_seconds: Option<Option<u32>>,
}

#[derive(Deserialize)]
pub struct ProgressInput {
    pub completed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostInput {
    pub title: String,
    pub content: Option<String>,
    pub category: Category,
    pub is_pinned: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Category>,
    pub is_pinned: Option<bool>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub status: UserStatus,
}

impl From<&UserRecord> for User {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            email: record.email.clone(),
            name: record.name.clone(),
            phone: record.phone.clone(),
            role: record.role,
            status: record.status,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&UserRecord> for AdminUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            email: record.email.clone(),
            name: record.name.clone(),
            phone: record.phone.clone(),
            role: record.role,
            status: record.status,
            created_at: record.created_at,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminVideo {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required_role: Role,
    pub is_published: bool,
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
}

impl From<&VideoRecord> for AdminVideo {
    fn from(record: &VideoRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            description: record.description.clone(),
            required_role: record.required_role,
            is_published: record.is_published,
            storage_path: record.storage_path.clone(),
            created_at: record.created_at,
            duration_seconds: record.duration_seconds,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required_role: Role,
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    pub id: String,
    pub title: String,
    pub signed_url: String,
    pub required_role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_seconds: Option<u32>,
    pub completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub category: Category,
    pub published_at: DateTime<Utc>,
    pub is_pinned: bool,
    pub views: u64,
}

impl From<&PostRecord> for Post {
    fn from(record: &PostRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            content: record.content.clone(),
            category: record.category,
            published_at: record.published_at,
            is_pinned: record.is_pinned,
            views: record.views,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPost {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub category: Category,
    pub is_published: bool,
    pub is_pinned: bool,
    pub views: u64,
    pub published_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl From<&PostRecord> for AdminPost {
    fn from(record: &PostRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            content: record.content.clone(),
            category: record.category,
            is_published: record.is_published,
            is_pinned: record.is_pinned,
            views: record.views,
            published_at: record.published_at,
            created_at: record.created_at,
        }
    }
}
