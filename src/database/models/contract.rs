use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Table;
use crate::types::RecordStatus;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: Uuid,
    pub name: String,
    pub phone_number: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contract {
    pub const TABLE: Table = Table::simple(
        "contracts",
        "contracts t",
        "t.id, t.name, t.phone_number, t.status, t.created_at, t.updated_at",
        "Contract",
    );
}
