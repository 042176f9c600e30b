// handlers/protected/contracts.rs - /api/contracts

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
use crate::database::models::Contract;
use crate::error::ApiError;
use crate::middleware::AuthUser;
use crate::services::{ContractInput, ContractService};
use crate::types::RecordStatus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<Uuid>,
    #[serde(alias = "contractName")]
    pub name: Option<String>,
    #[serde(alias = "sphoneNumber")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub status: Option<RecordStatus>,
}

impl ContractPayload {
    fn into_input(self, message: &str) -> Result<ContractInput, ApiError> {
        Ok(ContractInput {
            name: require_text(self.name, message)?,
            phone_number: require_text(self.phone_number, message)?,
            status: require(self.status, message)?,
        })
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<Contract>> {
    user.require_admin()?;
    let page = query.resolve(&state.config.api);
    page_response(ContractService::new(&state.pool).list(page).await)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ContractPayload>, JsonRejection>,
) -> ApiResult<Contract> {
    user.require_admin()?;
    let Json(body) = payload?;
    let input = body.into_input("contractName, phoneNumber and status are required.")?;

    let contract = ContractService::new(&state.pool).create(input).await?;
    Ok(ApiResponse::created(contract))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<ContractPayload>, JsonRejection>,
) -> ApiResult<Contract> {
    user.require_admin()?;
    let Json(body) = payload?;
    let message = "id, contractName, phoneNumber and status are required.";
    let id = require(body.id, message)?;
    let input = body.into_input(message)?;

    let contract = ContractService::new(&state.pool).update(id, input).await?;
    Ok(ApiResponse::success(contract))
}
