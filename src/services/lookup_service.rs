//! Departments, designations, employee types and locations.
//!
//! All four are a unique name plus a status, so one service covers them,
//! parameterized by a [`LookupKind`] marker type.

use sqlx::PgPool;
use std::marker::PhantomData;
use uuid::Uuid;

use super::ServiceError;
use crate::api::PageRequest;
use crate::database::models::LookupRecord;
use crate::database::repository::{Repository, Table};
use crate::types::RecordStatus;

const LOOKUP_COLUMNS: &str = "t.id, t.name, t.status, t.created_at, t.updated_at";

pub trait LookupKind: Send + Sync + 'static {
    const TABLE: Table;
    /// Field name clients use for the name, e.g. `departmentName`
    const NAME_FIELD: &'static str;
    const DUPLICATE_MESSAGE: &'static str;
}

pub struct Department;
pub struct Designation;
pub struct EmployeeType;
pub struct Location;

impl LookupKind for Department {
    const TABLE: Table = Table::simple("departments", "departments t", LOOKUP_COLUMNS, "Department");
    const NAME_FIELD: &'static str = "departmentName";
    const DUPLICATE_MESSAGE: &'static str = "A department with that name already exists.";
}

impl LookupKind for Designation {
    const TABLE: Table = Table::simple("designations", "designations t", LOOKUP_COLUMNS, "Designation");
    const NAME_FIELD: &'static str = "designationName";
    const DUPLICATE_MESSAGE: &'static str = "A designation with that name already exists.";
}

impl LookupKind for EmployeeType {
    const TABLE: Table = Table::simple("employee_types", "employee_types t", LOOKUP_COLUMNS, "Employee type");
    const NAME_FIELD: &'static str = "employeeTypeName";
    const DUPLICATE_MESSAGE: &'static str = "An employee type with that name already exists.";
}

impl LookupKind for Location {
    const TABLE: Table = Table::simple("locations", "locations t", LOOKUP_COLUMNS, "Location");
    const NAME_FIELD: &'static str = "locationName";
    const DUPLICATE_MESSAGE: &'static str = "A location with that name already exists.";
}

#[derive(Debug, Clone)]
pub struct LookupInput {
    pub name: String,
    pub status: RecordStatus,
}

pub struct LookupService<'a, K> {
    pool: &'a PgPool,
    _kind: PhantomData<K>,
}

impl<'a, K: LookupKind> LookupService<'a, K> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self {
            pool,
            _kind: PhantomData,
        }
    }

    fn repository(&self) -> Repository<'a, LookupRecord> {
        Repository::new(K::TABLE, self.pool)
    }

    pub async fn list(&self, page: PageRequest) -> Result<(Vec<LookupRecord>, i64), ServiceError> {
        Ok(self.repository().select_page(page).await?)
    }

    pub async fn create(&self, input: LookupInput) -> Result<LookupRecord, ServiceError> {
        let repository = self.repository();
        if repository.value_taken("name", &input.name, None).await? {
            return Err(ServiceError::conflict(K::DUPLICATE_MESSAGE));
        }

        let id = Uuid::new_v4();
        let sql = format!(
            "INSERT INTO {} (id, name, status) VALUES ($1, $2, $3)",
            K::TABLE.name
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.status)
            .execute(self.pool)
            .await?;

        tracing::info!(table = K::TABLE.name, %id, name = %input.name, "Created lookup record");
        Ok(repository.select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, input: LookupInput) -> Result<LookupRecord, ServiceError> {
        let repository = self.repository();
        repository.select_404(id).await?;

        if repository.value_taken("name", &input.name, Some(id)).await? {
            return Err(ServiceError::conflict(K::DUPLICATE_MESSAGE));
        }

        let sql = format!(
            "UPDATE {} SET name = $2, status = $3, updated_at = now() WHERE id = $1",
            K::TABLE.name
        );
        sqlx::query(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.status)
            .execute(self.pool)
            .await?;

        tracing::info!(table = K::TABLE.name, %id, "Updated lookup record");
        Ok(repository.select_404(id).await?)
    }
}
