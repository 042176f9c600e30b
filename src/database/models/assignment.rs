use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Table;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssetAssignment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub asset_id: Uuid,
    pub issue_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub return_reason: Option<String>,
    pub is_returned: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub assigned_to: AssignedUser,
    #[sqlx(flatten)]
    pub assigned_asset: AssignedAsset,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssignedUser {
    #[sqlx(rename = "assigned_user_id")]
    pub id: Uuid,
    #[sqlx(rename = "assigned_user_email")]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssignedAsset {
    #[sqlx(rename = "assigned_asset_id")]
    pub id: Uuid,
    #[sqlx(rename = "assigned_asset_name")]
    pub name: String,
    #[sqlx(rename = "assigned_asset_serial_number")]
    pub serial_number: String,
}

impl AssetAssignment {
    /// Open assignments first, then newest
    pub const TABLE: Table = Table {
        name: "asset_assignments",
        from: "asset_assignments t \
               JOIN users u ON u.id = t.user_id \
               JOIN assets a ON a.id = t.asset_id",
        columns: "t.id, t.user_id, t.asset_id, t.issue_date, t.return_date, t.return_reason, \
                  t.is_returned, t.created_at, t.updated_at, \
                  u.id AS assigned_user_id, u.email AS assigned_user_email, \
                  a.id AS assigned_asset_id, a.name AS assigned_asset_name, \
                  a.serial_number AS assigned_asset_serial_number",
        order_by: "t.is_returned ASC, t.created_at DESC",
        label: "Asset assignment",
    };
}
