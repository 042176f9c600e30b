// handlers/protected/inventory.rs - /api/inventory

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    Extension, Json,
};
use serde::Deserialize;
use uuid::Uuid;

use super::page_response;
use crate::api::payload::{blank_as_none, nullable, require, text};
use crate::api::{ApiResponse, ApiResult, Page, PageQuery};
use crate::app::AppState;
use crate::database::models::InventoryEntry;
use crate::middleware::AuthUser;
use crate::services::{InventoryChanges, InventoryService, NewInventory};
use crate::types::InventoryType;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub asset_id: Option<Uuid>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub inventory_type: Option<InventoryType>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub quantity: Option<i32>,
    /// `null` clears the remarks on update; an absent key leaves them
    #[serde(default, deserialize_with = "nullable")]
    pub remarks: Option<Option<String>>,
}

impl InventoryPayload {
    fn into_changes(self) -> InventoryChanges {
        InventoryChanges {
            asset_id: self.asset_id,
            inventory_type: self.inventory_type,
            quantity: self.quantity,
            remarks: self.remarks.map(text),
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<InventoryEntry>> {
    user.require_admin()?;
    let page = query.resolve(&state.config.api);
    page_response(InventoryService::new(&state.pool).list(page).await)
}

pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<InventoryPayload>, JsonRejection>,
) -> ApiResult<InventoryEntry> {
    user.require_admin()?;
    let Json(body) = payload?;
    let message = "Missing required fields: assetId, inventoryType, quantity";
    let input = NewInventory {
        asset_id: require(body.asset_id, message)?,
        inventory_type: require(body.inventory_type, message)?,
        quantity: require(body.quantity.filter(|q| *q != 0), message)?,
        remarks: text(body.remarks.flatten()),
    };

    let entry = InventoryService::new(&state.pool).create(input).await?;
    Ok(ApiResponse::created(entry))
}

/// Partial update: only the fields present in the body change
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<InventoryPayload>, JsonRejection>,
) -> ApiResult<InventoryEntry> {
    user.require_admin()?;
    let Json(body) = payload?;
    let id = require(body.id, "Missing required field: id")?;
    let entry = InventoryService::new(&state.pool)
        .update(id, body.into_changes())
        .await?;
    Ok(ApiResponse::success(entry))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes(body: &str) -> InventoryChanges {
        serde_json::from_str::<InventoryPayload>(body).unwrap().into_changes()
    }

    #[test]
    fn absent_remarks_are_left_alone() {
        let changes = changes(r#"{"id":"6f1c3a2e-8d47-4b8e-9a61-0c2d5e7f9b10","quantity":4}"#);
        assert_eq!(changes.quantity, Some(4));
        assert_eq!(changes.remarks, None);
    }

    #[test]
    fn null_or_blank_remarks_clear_them() {
        assert_eq!(changes(r#"{"remarks":null}"#).remarks, Some(None));
        assert_eq!(changes(r#"{"remarks":"  "}"#).remarks, Some(None));
        assert!(!changes(r#"{"remarks":null}"#).is_empty());
        assert_eq!(
            changes(r#"{"remarks":" recount "}"#).remarks,
            Some(Some("recount".to_string()))
        );
    }

    #[test]
    fn blank_selects_do_not_reject_the_body() {
        let changes = changes(r#"{"assetId":"","inventoryType":"","quantity":""}"#);
        assert!(changes.is_empty());
    }
}
