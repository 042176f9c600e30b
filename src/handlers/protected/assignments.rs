// handlers/protected/assignments.rs - /api/asset-assignment
//
// Listing and returning are open to every signed-in user; a USER is scoped
// to the assignments issued to their own email.

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::page_response;
use crate::api::payload::{blank_as_none, parse_date, require, require_text, text};
use crate::api::{ApiResponse, ApiResult, Page, PageQuery};
use crate::app::AppState;
use crate::database::models::AssetAssignment;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{AssignmentScope, AssignmentService, NewAssignment};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAssignmentPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub user_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub asset_id: Option<Uuid>,
    pub issue_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<Uuid>,
    pub return_reason: Option<String>,
}

fn scope_for(user: &AuthUser) -> AssignmentScope {
    if user.is_admin() {
        AssignmentScope::All
    } else {
        AssignmentScope::OwnedBy(user.email.clone())
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<AssetAssignment>> {
    let page = query.resolve(&state.config.api);
    let scope = scope_for(&user);
    page_response(AssignmentService::new(&state.pool).list(&scope, page).await)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<NewAssignmentPayload>, JsonRejection>,
) -> ApiResult<AssetAssignment> {
    user.require_admin()?;
    let Json(body) = payload?;
    let message = "Missing required fields: userId, assetId, issueDate";
    let user_id = require(body.user_id, message)?;
    let asset_id = require(body.asset_id, message)?;
    let issue_date = require_text(body.issue_date, message)?;
    let issue_date = parse_date(&issue_date)
        .ok_or_else(|| ApiError::bad_request("issueDate must be a valid date."))?;

    let assignment = AssignmentService::new(&state.pool)
        .create(NewAssignment {
            user_id,
            asset_id,
            issue_date,
        })
        .await?;
    Ok(ApiResponse::created(assignment))
}

/// PATCH /api/asset-assignment - mark an open assignment as returned
pub async fn return_asset(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ReturnPayload>, JsonRejection>,
) -> ApiResult<AssetAssignment> {
    let Json(body) = payload?;
    let id = require(body.id, "Missing required field: id")?;

    let assignment = AssignmentService::new(&state.pool)
        .return_asset(id, text(body.return_reason), &scope_for(&user))
        .await?;
    Ok(ApiResponse::success(assignment))
}
