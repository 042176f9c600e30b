use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceError;
use crate::api::PageRequest;
use crate::database::models::Employee;
use crate::database::repository::{ensure_exists, Repository};
use crate::types::RecordStatus;

const DUPLICATE_MESSAGE: &str = "Employee with same ID or phone already exists.";

#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub employee_code: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub department_id: Option<Uuid>,
    pub designation_id: Uuid,
    pub employee_type_id: Uuid,
    pub contract_id: Option<Uuid>,
    pub phone_no: String,
    pub status: RecordStatus,
}

pub struct EmployeeService<'a> {
    pool: &'a PgPool,
}

impl<'a> EmployeeService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> Repository<'a, Employee> {
        Repository::new(Employee::TABLE, self.pool)
    }

    pub async fn list(&self, page: PageRequest) -> Result<(Vec<Employee>, i64), ServiceError> {
        Ok(self.repository().select_page(page).await?)
    }

    pub async fn create(&self, input: EmployeeInput) -> Result<Employee, ServiceError> {
        self.check_duplicates(&input, None).await?;
        self.check_references(&input).await?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO employees \
                 (id, employee_code, first_name, last_name, department_id, designation_id, \
                  employee_type_id, contract_id, phone_no, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(id)
        .bind(&input.employee_code)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.department_id)
        .bind(input.designation_id)
        .bind(input.employee_type_id)
        .bind(input.contract_id)
        .bind(&input.phone_no)
        .bind(input.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, "Created employee");
        Ok(self.repository().select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, input: EmployeeInput) -> Result<Employee, ServiceError> {
        let repository = self.repository();
        repository.select_404(id).await?;

        self.check_duplicates(&input, Some(id)).await?;
        self.check_references(&input).await?;

        sqlx::query(
            "UPDATE employees SET \
                 employee_code = $2, first_name = $3, last_name = $4, department_id = $5, \
                 designation_id = $6, employee_type_id = $7, contract_id = $8, phone_no = $9, \
                 status = $10, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.employee_code)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(input.department_id)
        .bind(input.designation_id)
        .bind(input.employee_type_id)
        .bind(input.contract_id)
        .bind(&input.phone_no)
        .bind(input.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, "Updated employee");
        Ok(repository.select_404(id).await?)
    }

    async fn check_duplicates(&self, input: &EmployeeInput, exclude: Option<Uuid>) -> Result<(), ServiceError> {
        let repository = self.repository();
        if repository.value_taken("phone_no", &input.phone_no, exclude).await? {
            return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
        }
        if let Some(code) = &input.employee_code {
            if repository.value_taken("employee_code", code, exclude).await? {
                return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
            }
        }
        Ok(())
    }

    async fn check_references(&self, input: &EmployeeInput) -> Result<(), ServiceError> {
        ensure_exists(self.pool, "designations", "Designation", input.designation_id).await?;
        ensure_exists(self.pool, "employee_types", "Employee type", input.employee_type_id).await?;
        if let Some(department_id) = input.department_id {
            ensure_exists(self.pool, "departments", "Department", department_id).await?;
        }
        if let Some(contract_id) = input.contract_id {
            ensure_exists(self.pool, "contracts", "Contract", contract_id).await?;
        }
        Ok(())
    }
}
