// handlers/protected/lookups.rs - departments, designations, employee types, locations

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::page_response;
use crate::api::payload::{blank_as_none, require, require_text};
use crate::api::{ApiResponse, ApiResult, Page, PageQuery};
use crate::app::AppState;
use crate::database::models::LookupRecord;
use crate::middleware::AuthUser;
use crate::services::{LookupInput, LookupKind, LookupService};
use crate::types::RecordStatus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<Uuid>,
    #[serde(
        alias = "departmentName",
        alias = "designationName",
        alias = "employeeTypeName",
        alias = "locationName"
    )]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<RecordStatus>,
}

impl LookupPayload {
    fn into_input(self, message: &str) -> Result<LookupInput, crate::error::ApiError> {
        Ok(LookupInput {
            name: require_text(self.name, message)?,
            status: require(self.status, message)?,
        })
    }
}

pub async fn list<K: LookupKind>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<LookupRecord>> {
    user.require_admin()?;
    let page = query.resolve(&state.config.api);
    page_response(LookupService::<K>::new(&state.pool).list(page).await)
}

pub async fn create<K: LookupKind>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<LookupPayload>, JsonRejection>,
) -> ApiResult<LookupRecord> {
    user.require_admin()?;
    let Json(body) = payload?;
    let input = body.into_input(&format!("{} and status are required.", K::NAME_FIELD))?;

    let record = LookupService::<K>::new(&state.pool).create(input).await?;
    Ok(ApiResponse::created(record))
}

pub async fn update<K: LookupKind>(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<LookupPayload>, JsonRejection>,
) -> ApiResult<LookupRecord> {
    user.require_admin()?;
    let Json(body) = payload?;
    let message = format!("id, {} and status are required.", K::NAME_FIELD);
    let id = require(body.id, &message)?;
    let input = body.into_input(&message)?;

    let record = LookupService::<K>::new(&state.pool).update(id, input).await?;
    Ok(ApiResponse::success(record))
}
