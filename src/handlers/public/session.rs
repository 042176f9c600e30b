use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{AppendHeaders, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::api::payload::require_text;
use crate::app::AppState;
use crate::auth::{cookie, generate_jwt, Claims};
use crate::error::ApiError;
use crate::services::UserService;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// POST /api/auth/signin - exchange credentials for the session cookie
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = payload?;
    let email = require_text(body.email, "Email and password are required.")?;
    // Passwords are not trimmed
    let password = body
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| ApiError::bad_request("Email and password are required."))?;

    let user = UserService::new(&state.pool).authenticate(&email, &password).await?;

    let security = &state.config.security;
    let claims = Claims::new(user.id, user.email.clone(), user.role, security.jwt_expiry_hours);
    let token = generate_jwt(&claims, security)?;

    tracing::info!(id = %user.id, email = %user.email, "User signed in");

    Ok((
        StatusCode::OK,
        AppendHeaders([(header::SET_COOKIE, cookie::session_cookie(&token, security))]),
        Json(json!({
            "success": true,
            "role": user.role,
            "email": user.email,
        })),
    )
        .into_response())
}

/// POST /api/auth/signout - expire the session cookie
pub async fn signout(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        AppendHeaders([(
            header::SET_COOKIE,
            cookie::clear_session_cookie(&state.config.security),
        )]),
        Json(json!({ "success": true })),
    )
        .into_response()
}
