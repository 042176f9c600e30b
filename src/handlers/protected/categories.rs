// handlers/protected/categories.rs - /api/asset-category

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::{page_response, SearchQuery};
use crate::api::payload::{blank_as_none, require, require_text, text};
use crate::api::{ApiResponse, ApiResult, Page, PageQuery};
use crate::app::AppState;
use crate::database::models::{AssetCategory, CategoryOption};
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{CategoryInput, CategoryService};
use crate::types::RecordStatus;

const REQUIRED: &str = "All fields are required.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<Uuid>,
    #[serde(alias = "categoryName")]
    pub name: Option<String>,
    #[serde(alias = "categoryDescription")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub parent_category_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<RecordStatus>,
}

impl CategoryPayload {
    fn into_input(self) -> Result<CategoryInput, ApiError> {
        Ok(CategoryInput {
            name: require_text(self.name, REQUIRED)?,
            description: text(self.description),
            parent_category_id: self.parent_category_id,
            status: require(self.status, REQUIRED)?,
        })
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<AssetCategory>> {
    user.require_admin()?;
    let page = query.resolve(&state.config.api);
    page_response(CategoryService::new(&state.pool).list(page).await)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> ApiResult<AssetCategory> {
    user.require_admin()?;
    let Json(body) = payload?;
    let input = body.into_input()?;

    let category = CategoryService::new(&state.pool).create(input).await?;
    Ok(ApiResponse::created(category))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CategoryPayload>, JsonRejection>,
) -> ApiResult<AssetCategory> {
    user.require_admin()?;
    let Json(body) = payload?;
    let id = require(body.id, REQUIRED)?;
    let input = body.into_input()?;

    let category = CategoryService::new(&state.pool).update(id, input).await?;
    Ok(ApiResponse::success(category))
}

/// GET /api/asset-category/search?categoryName=
pub async fn search(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Vec<CategoryOption>> {
    user.require_admin()?;
    let term = query.category_name.unwrap_or_default();
    let options = CategoryService::new(&state.pool)
        .search(&term, state.config.api.search_limit)
        .await?;
    Ok(ApiResponse::success(options))
}
