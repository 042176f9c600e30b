// handlers/protected/users.rs - /api/users

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{page_response, SearchQuery};
use crate::api::payload::{blank_as_none, require, require_text};
use crate::api::{ApiResponse, ApiResult, Page, PageQuery};
use crate::app::AppState;
use crate::database::models::{User, UserOption};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{NewUser, UserChanges, UserService};
use crate::types::{RecordStatus, Role};

const REQUIRED: &str = "All fields are required.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<Uuid>,
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub role: Option<Role>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub mobile_number: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub employee_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<RecordStatus>,
}

impl UserPayload {
    /// Everything but the password, which only create accepts
    fn into_changes(self) -> Result<UserChanges, ApiError> {
        Ok(UserChanges {
            email: require_text(self.email, REQUIRED)?,
            role: require(self.role, REQUIRED)?,
            first_name: require_text(self.first_name, REQUIRED)?,
            last_name: require_text(self.last_name, REQUIRED)?,
            mobile_number: require_text(self.mobile_number, REQUIRED)?,
            employee_id: self.employee_id,
            status: require(self.status, REQUIRED)?,
        })
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<User>> {
    user.require_admin()?;
    let page = query.resolve(&state.config.api);
    page_response(UserService::new(&state.pool).list(page).await)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<User> {
    user.require_admin()?;
    let Json(mut body) = payload?;
    let password = require(body.password.take().filter(|p| !p.is_empty()), REQUIRED)?;
    let changes = body.into_changes()?;

    let input = NewUser {
        email: changes.email,
        password,
        role: changes.role,
        first_name: changes.first_name,
        last_name: changes.last_name,
        mobile_number: changes.mobile_number,
        employee_id: changes.employee_id,
        status: changes.status,
    };
    let created = UserService::new(&state.pool).create(input).await?;
    Ok(ApiResponse::created(created))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<UserPayload>, JsonRejection>,
) -> ApiResult<User> {
    user.require_admin()?;
    let Json(body) = payload?;
    let id = require(body.id, REQUIRED)?;
    let changes = body.into_changes()?;

    let updated = UserService::new(&state.pool).update(id, changes).await?;
    Ok(ApiResponse::success(updated))
}

/// GET /api/users/search?email=
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<UserOption>> {
    user.require_admin()?;
    let term = query.email.unwrap_or_default();
    let options = UserService::new(&state.pool)
        .search(&term, state.config.api.search_limit)
        .await?;
    Ok(ApiResponse::success(options))
}
