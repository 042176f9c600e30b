use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceError;
use crate::api::PageRequest;
use crate::database::models::Spare;
use crate::database::repository::Repository;
use crate::types::RecordStatus;

const DUPLICATE_MESSAGE: &str = "A spare with that name already exists.";

#[derive(Debug, Clone)]
pub struct SpareInput {
    pub name: String,
    pub spec: Option<String>,
    pub uom: String,
    pub status: RecordStatus,
}

pub struct SpareService<'a> {
    pool: &'a PgPool,
}

impl<'a> SpareService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> Repository<'a, Spare> {
        Repository::new(Spare::TABLE, self.pool)
    }

    pub async fn list(&self, page: PageRequest) -> Result<(Vec<Spare>, i64), ServiceError> {
        Ok(self.repository().select_page(page).await?)
    }

    pub async fn create(&self, input: SpareInput) -> Result<Spare, ServiceError> {
        let repository = self.repository();
        if repository.value_taken("name", &input.name, None).await? {
            return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
        }

        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO spares (id, name, spec, uom, status) VALUES ($1, $2, $3, $4, $5)")
            .bind(id)
            .bind(&input.name)
            .bind(&input.spec)
            .bind(&input.uom)
            .bind(input.status)
            .execute(self.pool)
            .await?;

        tracing::info!(%id, name = %input.name, "Created spare");
        Ok(repository.select_404(id).await?)
    }

    /// Full replacement; a missing `spec` clears it
    pub async fn update(&self, id: Uuid, input: SpareInput) -> Result<Spare, ServiceError> {
        let repository = self.repository();
        repository.select_404(id).await?;

        if repository.value_taken("name", &input.name, Some(id)).await? {
            return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
        }

        sqlx::query(
            "UPDATE spares SET name = $2, spec = $3, uom = $4, status = $5, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.spec)
        .bind(&input.uom)
        .bind(input.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, "Updated spare");
        Ok(repository.select_404(id).await?)
    }
}
