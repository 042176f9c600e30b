use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::database::repository::Table;
use crate::types::RecordStatus;

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,
    pub employee_code: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub department_id: Option<Uuid>,
    pub department_name: Option<String>,
    pub designation_id: Uuid,
    pub designation_name: Option<String>,
    pub employee_type_id: Uuid,
    pub employee_type_name: Option<String>,
    pub contract_id: Option<Uuid>,
    pub contract_name: Option<String>,
    pub phone_no: String,
    pub status: RecordStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub const TABLE: Table = Table::simple(
        "employees",
        "employees t \
         LEFT JOIN departments d ON d.id = t.department_id \
         LEFT JOIN designations g ON g.id = t.designation_id \
         LEFT JOIN employee_types e ON e.id = t.employee_type_id \
         LEFT JOIN contracts c ON c.id = t.contract_id",
        "t.id, t.employee_code, t.first_name, t.last_name, \
         t.department_id, d.name AS department_name, \
         t.designation_id, g.name AS designation_name, \
         t.employee_type_id, e.name AS employee_type_name, \
         t.contract_id, c.name AS contract_name, \
         t.phone_no, t.status, t.created_at, t.updated_at",
        "Employee",
    );
}
