use axum::{Extension, Json};
use serde_json::{json, Value};

use crate::middleware::AuthUser;

/// GET /api/auth/me - identity carried by the session cookie
pub async fn me(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({
        "id": user.user_id,
        "email": user.email,
        "role": user.role,
    }))
}
