use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Table;
use crate::types::RecordStatus;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Spare {
    pub id: Uuid,
    pub name: String,
    pub spec: Option<String>,
    /// Unit of measure
    pub uom: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Spare {
    pub const TABLE: Table = Table::simple(
        "spares",
        "spares t",
        "t.id, t.name, t.spec, t.uom, t.status, t.created_at, t.updated_at",
        "Spare",
    );
}
