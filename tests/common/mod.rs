#![allow(dead_code)]

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use asset_desk::app::{router, AppState};
use asset_desk::auth::{generate_jwt, Claims};
use asset_desk::config::AppConfig;
use asset_desk::database::DatabaseManager;
use asset_desk::types::Role;

pub fn test_config() -> AppConfig {
    let mut config = AppConfig::development();
    config.api.enable_request_logging = false;
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database.url = url;
    }
    config
}

/// Router over a lazily-connecting pool; nothing touches the database
/// until a handler runs a query. Must be called inside a tokio runtime.
pub fn app() -> Router {
    let config = test_config();
    let pool = DatabaseManager::build_pool(&config.database).expect("test pool");
    router(AppState::new(pool, config))
}

pub fn token_for(role: Role, email: &str) -> String {
    let security = test_config().security;
    let claims = Claims::new(Uuid::new_v4(), email.to_string(), role, 1);
    generate_jwt(&claims, &security).expect("token")
}

pub fn admin_cookie() -> String {
    format!("token={}", token_for(Role::Admin, "admin@example.com"))
}

pub fn user_cookie() -> String {
    format!("token={}", token_for(Role::User, "user@example.com"))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn error(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }

    pub fn location(&self) -> Option<&str> {
        self.headers.get(header::LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn set_cookie(&self) -> Option<&str> {
        self.headers.get(header::SET_COOKIE).and_then(|v| v.to_str().ok())
    }
}

/// Send one request through the router. `body` is sent verbatim as JSON.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    body: Option<&str>,
) -> Result<TestResponse> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    Ok(TestResponse {
        status,
        headers,
        body,
    })
}
