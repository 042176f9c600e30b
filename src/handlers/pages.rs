// handlers/pages.rs - Gatekept browser pages
//
// `page_gatekeeper` has already redirected anyone without the right role, so
// these handlers can rely on the injected `AuthUser`.

use axum::{extract::State, Extension, Json};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{AssignmentService, DashboardService};

/// GET / - admin dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let summary = DashboardService::new(&state.pool).summary().await?;
    Ok(Json(json!({
        "page": "dashboard",
        "email": user.email,
        "summary": summary,
    })))
}

/// GET /user, /user/* - the signed-in user's open assignments
pub async fn user_assets(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Value>, ApiError> {
    let assignments = AssignmentService::new(&state.pool).open_for(&user.email).await?;
    Ok(Json(json!({
        "page": "user-assets",
        "email": user.email,
        "assignments": assignments,
    })))
}
