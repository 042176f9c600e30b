use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Table;
use crate::types::InventoryType;

/// One stock movement, with the asset it refers to
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub asset_name: String,
    pub serial_number: String,
    pub inventory_type: InventoryType,
    pub quantity: i32,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryEntry {
    pub const TABLE: Table = Table::simple(
        "inventory",
        "inventory t JOIN assets a ON a.id = t.asset_id",
        "t.id, t.asset_id, a.name AS asset_name, a.serial_number, t.inventory_type, \
         t.quantity, t.remarks, t.created_at, t.updated_at",
        "Inventory record",
    );
}
