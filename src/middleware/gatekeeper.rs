//! Redirect-based guard for browser page navigations

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::auth::authenticate;
use crate::app::AppState;
use crate::types::Role;

pub const SIGNIN_PATH: &str = "/signin";
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";

/// Role a page requires, or `None` for paths the gatekeeper ignores
pub fn required_role(path: &str) -> Option<Role> {
    if path == "/" {
        Some(Role::Admin)
    } else if path == "/user" || path.starts_with("/user/") {
        Some(Role::User)
    } else {
        None
    }
}

pub async fn page_gatekeeper(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let Some(required) = required_role(request.uri().path()) else {
        return next.run(request).await;
    };

    let user = match authenticate(request.headers(), &state.config.security) {
        Ok(user) => user,
        Err(e) => {
            tracing::debug!(path = request.uri().path(), "Page requires sign-in: {}", e);
            return Redirect::temporary(SIGNIN_PATH).into_response();
        }
    };

    if user.role != required {
        tracing::debug!(path = request.uri().path(), role = %user.role, "Page denied for role");
        return Redirect::temporary(UNAUTHORIZED_PATH).into_response();
    }

    request.extensions_mut().insert(user);
    next.run(request).await
}
