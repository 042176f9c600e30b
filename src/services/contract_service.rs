use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceError;
use crate::api::PageRequest;
use crate::database::models::Contract;
use crate::database::repository::Repository;
use crate::types::RecordStatus;

const DUPLICATE_MESSAGE: &str = "A contract with that name already exists.";

#[derive(Debug, Clone)]
pub struct ContractInput {
    pub name: String,
    pub phone_number: String,
    pub status: RecordStatus,
}

pub struct ContractService<'a> {
    pool: &'a PgPool,
}

impl<'a> ContractService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> Repository<'a, Contract> {
        Repository::new(Contract::TABLE, self.pool)
    }

    pub async fn list(&self, page: PageRequest) -> Result<(Vec<Contract>, i64), ServiceError> {
        Ok(self.repository().select_page(page).await?)
    }

    pub async fn create(&self, input: ContractInput) -> Result<Contract, ServiceError> {
        let repository = self.repository();
        if repository.value_taken("name", &input.name, None).await? {
            return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
        }

        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO contracts (id, name, phone_number, status) VALUES ($1, $2, $3, $4)")
            .bind(id)
            .bind(&input.name)
            .bind(&input.phone_number)
            .bind(input.status)
            .execute(self.pool)
            .await?;

        tracing::info!(%id, name = %input.name, "Created contract");
        Ok(repository.select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, input: ContractInput) -> Result<Contract, ServiceError> {
        let repository = self.repository();
        repository.select_404(id).await?;

        if repository.value_taken("name", &input.name, Some(id)).await? {
            return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
        }

        sqlx::query(
            "UPDATE contracts SET name = $2, phone_number = $3, status = $4, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.phone_number)
        .bind(input.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, "Updated contract");
        Ok(repository.select_404(id).await?)
    }
}
