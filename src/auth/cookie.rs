//! Session cookie parsing and `Set-Cookie` rendering

use axum::http::{header, HeaderMap};

use crate::config::SecurityConfig;

/// Find a cookie value by name across all `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

pub fn session_cookie(token: &str, security: &SecurityConfig) -> String {
    let max_age = security.jwt_expiry_hours * 60 * 60;
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        security.cookie_name, token, max_age
    );
    if security.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_session_cookie(security: &SecurityConfig) -> String {
    let mut cookie = format!(
        "{}=; HttpOnly; Path=/; SameSite=Lax; Max-Age=0",
        security.cookie_name
    );
    if security.cookie_secure {
        cookie.push_str("; Secure");
    }
    cookie
}
