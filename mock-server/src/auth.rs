use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::error::MockError;
use crate::models::{LoginInput, RegisterInput, Role, User, UserRecord, UserStatus};
use crate::store::{session_token, Db, SESSION_COOKIE};

pub async fn register(
    State(db): State<Db>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse, MockError> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(MockError::BadRequest(
            "Email and password are required".to_string(),
        ));
    }
    if input.role == Role::Admin {
        return Err(MockError::BadRequest(
            "Admin accounts cannot be self-registered".to_string(),
        ));
    }

    let mut store = db.write().await;
    if store.find_by_email(&input.email).is_some() {
        return Err(MockError::Conflict("Email already registered"));
    }
    let user = UserRecord {
        id: Uuid::new_v4().to_string(),
        email: input.email.trim().to_string(),
        password: input.password,
        name: input.name,
        phone: input.phone,
        role: input.role,
        status: UserStatus::Pending,
        created_at: Utc::now(),
    };
    store.users.insert(user.id.clone(), user);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Registration received. An administrator will review it." })),
    ))
}

pub async fn login(
    State(db): State<Db>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, MockError> {
    let mut store = db.write().await;
    let user = store
        .find_by_email(&input.email)
        .filter(|user| user.password == input.password)
        .cloned()
        .ok_or(MockError::InvalidCredentials("Invalid credentials"))?;
    let token = store.open_session(&user.id);

    let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "user": User::from(&user) })),
    ))
}

pub async fn logout(State(db): State<Db>, headers: HeaderMap) -> impl IntoResponse {
    if let Some(token) = session_token(&headers) {
        db.write().await.sessions.remove(&token);
    }
    let expired = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Max-Age=0");
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, expired)])
}

pub async fn me(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, MockError> {
    let user = db.read().await.authenticate(&headers)?;
    Ok(Json(json!({ "user": User::from(&user) })))
}
