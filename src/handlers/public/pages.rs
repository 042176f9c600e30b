use axum::Json;
use serde_json::{json, Value};

/// GET /signin
pub async fn signin_page() -> Json<Value> {
    Json(json!({
        "page": "signin",
        "action": "/api/auth/signin",
    }))
}

/// GET /unauthorized
pub async fn unauthorized_page() -> Json<Value> {
    Json(json!({
        "page": "unauthorized",
        "error": "You do not have access to this page.",
    }))
}
