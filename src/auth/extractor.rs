use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::CookieJar;

use crate::auth::hash_token;
use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

pub const SESSION_COOKIE: &str = "session";

pub struct AuthUser {
    pub user: User,
    pub session_token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        // Cookie first, then the Authorization header
        let token = CookieJar::from_headers(&parts.headers)
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .or_else(|| {
                parts
                    .headers
                    .get(AUTHORIZATION)
                    .and_then(|value| value.to_str().ok())
                    .and_then(|value| value.strip_prefix("Bearer "))
                    .map(|token| token.trim().to_string())
            })
            .filter(|token| !token.is_empty())
            .ok_or(AppError::Unauthorized("Missing or invalid session"))?;

        let session = state
            .sessions
            .find_by_token_hash(&hash_token(&token))
            .await?
            .ok_or(AppError::Unauthorized("Invalid token"))?;

        let user = state
            .users
            .find_by_id(session.user_id)
            .await?
            .ok_or(AppError::Unauthorized("Invalid token"))?;

        Ok(AuthUser {
            user,
            session_token: token,
        })
    }
}
