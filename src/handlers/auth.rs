use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::{
    cookie::{Cookie, CookieJar, SameSite},
    WithRejection,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::input::optional_text;
use super::JsonBody;
use crate::auth::{generate_token, hash_password, hash_token, verify_password, AuthUser, SESSION_COOKIE};
use crate::error::{AppError, Result};
use crate::models::{normalize_email, CreateUser, UpdateProfile, User, UserResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

fn credentials(email: &str, password: &str) -> Result<String> {
    let email = normalize_email(email);
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    Ok(email)
}

async fn start_session(
    state: &AppState,
    jar: CookieJar,
    user: User,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let token = generate_token();
    state.sessions.create(user.id, &hash_token(&token)).await?;

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(state.config.session_ttl_days))
        .build();

    Ok((
        jar.add(cookie),
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

pub async fn register(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(input), _): JsonBody<CreateUser>,
) -> Result<(StatusCode, CookieJar, Json<AuthResponse>)> {
    let email = credentials(&input.email, &input.password)?;

    if state.users.email_exists(&email).await? {
        return Err(AppError::BadRequest("Email already in use".to_string()));
    }

    let password_hash = hash_password(&input.password)?;
    let name = optional_text(input.name.as_deref());
    let user = state
        .users
        .create(&email, &password_hash, name.as_deref())
        .await?;

    tracing::info!(user_id = user.id, "user registered");

    let (jar, body) = start_session(&state, jar, user).await?;
    Ok((StatusCode::CREATED, jar, body))
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    WithRejection(Json(input), _): JsonBody<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>)> {
    let email = credentials(&input.email, &input.password)?;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::Unauthorized("Invalid credentials"))?;

    if !verify_password(&input.password, &user.password_hash)? {
        return Err(AppError::Unauthorized("Invalid credentials"));
    }

    start_session(&state, jar, user).await
}

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    auth: AuthUser,
) -> Result<(CookieJar, StatusCode)> {
    state
        .sessions
        .delete_by_token_hash(&hash_token(&auth.session_token))
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(time::Duration::seconds(0))
        .build();

    Ok((jar.add(cookie), StatusCode::NO_CONTENT))
}

pub async fn me(auth: AuthUser) -> Json<Value> {
    Json(json!({ "user": UserResponse::from(auth.user) }))
}

pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    WithRejection(Json(input), _): JsonBody<UpdateProfile>,
) -> Result<Json<Value>> {
    let name = optional_text(input.name.as_deref());
    let user = state.users.update_name(auth.user.id, name.as_deref()).await?;

    Ok(Json(json!({ "user": UserResponse::from(user) })))
}
