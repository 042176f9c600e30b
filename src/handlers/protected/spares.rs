// handlers/protected/spares.rs - /api/spares

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::page_response;
use crate::api::payload::{blank_as_none, require, require_text, text};
use crate::api::{ApiResponse, ApiResult, Page, PageQuery};
use crate::app::AppState;
use crate::database::models::Spare;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{SpareInput, SpareService};
use crate::types::RecordStatus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<Uuid>,
    #[serde(alias = "spareName")]
    pub name: Option<String>,
    #[serde(alias = "spareSpec")]
    pub spec: Option<String>,
    pub uom: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<RecordStatus>,
}

impl SparePayload {
    fn into_input(self, message: &str) -> Result<SpareInput, ApiError> {
        Ok(SpareInput {
            name: require_text(self.name, message)?,
            spec: text(self.spec),
            uom: require_text(self.uom, message)?,
            status: require(self.status, message)?,
        })
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<Spare>> {
    user.require_admin()?;
    let page = query.resolve(&state.config.api);
    page_response(SpareService::new(&state.pool).list(page).await)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<SparePayload>, JsonRejection>,
) -> ApiResult<Spare> {
    user.require_admin()?;
    let Json(body) = payload?;
    let input = body.into_input("spareName, uom and status are required.")?;

    let spare = SpareService::new(&state.pool).create(input).await?;
    Ok(ApiResponse::created(spare))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<SparePayload>, JsonRejection>,
) -> ApiResult<Spare> {
    user.require_admin()?;
    let Json(body) = payload?;
    let message = "id, spareName, uom and status are required.";
    let id = require(body.id, message)?;
    let input = body.into_input(message)?;

    let spare = SpareService::new(&state.pool).update(id, input).await?;
    Ok(ApiResponse::success(spare))
}
