use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Table;
use crate::types::{RecordStatus, Role};

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub employee_id: Option<Uuid>,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub const TABLE: Table = Table::simple(
        "users",
        "users t",
        "t.id, t.email, t.password_hash, t.role, t.first_name, t.last_name, \
         t.mobile_number, t.employee_id, t.status, t.created_at, t.updated_at",
        "User",
    );

    pub fn is_active(&self) -> bool {
        self.status == RecordStatus::Active
    }
}

/// Typeahead result
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserOption {
    pub id: Uuid,
    pub email: String,
}
