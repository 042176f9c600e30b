use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::{cookie::read_cookie, validate_jwt, AuthError, Claims};
use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::types::Role;

/// Authenticated user context extracted from the session cookie
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admin-only endpoints reject other roles as unauthorized
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            tracing::debug!(email = %self.email, role = %self.role, "Rejected non-admin request");
            Err(ApiError::unauthorized())
        }
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Decode the session cookie into the caller's identity
pub fn authenticate(headers: &HeaderMap, security: &SecurityConfig) -> Result<AuthUser, AuthError> {
    let token = read_cookie(headers, &security.cookie_name).ok_or(AuthError::MissingToken)?;
    let claims = validate_jwt(&token, security)?;
    Ok(AuthUser::from(claims))
}

/// Rejects requests without a valid session and injects [`AuthUser`]
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_user = authenticate(request.headers(), &state.config.security)?;

    request.extensions_mut().insert(auth_user);
    Ok(next.run(request).await)
}
