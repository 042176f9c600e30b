use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Table;
use crate::types::RecordStatus;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AssetCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Option<Uuid>,
    pub parent_category_name: Option<String>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssetCategory {
    pub const TABLE: Table = Table::simple(
        "asset_categories",
        "asset_categories t LEFT JOIN asset_categories p ON p.id = t.parent_category_id",
        "t.id, t.name, t.description, t.parent_category_id, p.name AS parent_category_name, \
         t.status, t.created_at, t.updated_at",
        "Category",
    );
}

/// Typeahead result
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CategoryOption {
    pub id: Uuid,
    pub name: String,
}
