use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Table;
use crate::types::AssetStatus;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub serial_number: String,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub status: AssetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub const TABLE: Table = Table::simple(
        "assets",
        "assets t LEFT JOIN asset_categories c ON c.id = t.category_id",
        "t.id, t.name, t.description, t.serial_number, t.category_id, c.name AS category_name, \
         t.status, t.created_at, t.updated_at",
        "Asset",
    );
}

/// Typeahead result
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AssetOption {
    pub id: Uuid,
    pub name: String,
}
