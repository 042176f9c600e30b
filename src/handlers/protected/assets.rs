// handlers/protected/assets.rs - /api/asset

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
use crate::database::models::{Asset, AssetOption};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{AssetInput, AssetService};
use crate::types::AssetStatus;

const REQUIRED: &str = "All fields are required.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<Uuid>,
    #[serde(alias = "assetName")]
    pub name: Option<String>,
    #[serde(alias = "assetDescription")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category_id: Option<Uuid>,
    pub serial_number: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<AssetStatus>,
}

impl AssetPayload {
    fn into_input(self) -> Result<AssetInput, ApiError> {
        Ok(AssetInput {
            name: require_text(self.name, REQUIRED)?,
            description: require_text(self.description, REQUIRED)?,
            category_id: require(self.category_id, REQUIRED)?,
            serial_number: require_text(self.serial_number, REQUIRED)?,
            status: require(self.status, REQUIRED)?,
        })
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<Asset>> {
    user.require_admin()?;
    let page = query.resolve(&state.config.api);
    page_response(AssetService::new(&state.pool).list(page).await)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<AssetPayload>, JsonRejection>,
) -> ApiResult<Asset> {
    user.require_admin()?;
    let Json(body) = payload?;
    let input = body.into_input()?;

    let asset = AssetService::new(&state.pool).create(input).await?;
    Ok(ApiResponse::created(asset))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<AssetPayload>, JsonRejection>,
) -> ApiResult<Asset> {
    user.require_admin()?;
    let Json(body) = payload?;
    let id = require(body.id, REQUIRED)?;
    let input = body.into_input()?;

    let asset = AssetService::new(&state.pool).update(id, input).await?;
    Ok(ApiResponse::success(asset))
}

/// GET /api/asset/search?assetName=
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<AssetOption>> {
    user.require_admin()?;
    let term = query.asset_name.unwrap_or_default();
    let options = AssetService::new(&state.pool)
        .search(&term, state.config.api.search_limit)
        .await?;
    Ok(ApiResponse::success(options))
}
