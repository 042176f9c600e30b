use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceError;
use crate::api::payload::like_pattern;
use crate::api::PageRequest;
use crate::database::models::{Asset, AssetOption};
use crate::database::repository::{ensure_exists, Repository};
use crate::types::AssetStatus;

const DUPLICATE_MESSAGE: &str = "Asset name already exists.";

#[derive(Debug, Clone)]
pub struct AssetInput {
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub serial_number: String,
    pub status: AssetStatus,
}

pub struct AssetService<'a> {
    pool: &'a PgPool,
}

impl<'a> AssetService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> Repository<'a, Asset> {
        Repository::new(Asset::TABLE, self.pool)
    }

    pub async fn list(&self, page: PageRequest) -> Result<(Vec<Asset>, i64), ServiceError> {
        Ok(self.repository().select_page(page).await?)
    }

    pub async fn create(&self, input: AssetInput) -> Result<Asset, ServiceError> {
        let repository = self.repository();
        if repository.value_taken("name", &input.name, None).await? {
            return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
        }
        ensure_exists(self.pool, "asset_categories", "Category", input.category_id).await?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO assets (id, name, description, serial_number, category_id, status) \
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.serial_number)
        .bind(input.category_id)
        .bind(input.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, name = %input.name, "Created asset");
        Ok(repository.select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, input: AssetInput) -> Result<Asset, ServiceError> {
        let repository = self.repository();
        repository.select_404(id).await?;

        if repository.value_taken("name", &input.name, Some(id)).await? {
            return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
        }
        ensure_exists(self.pool, "asset_categories", "Category", input.category_id).await?;

        sqlx::query(
            "UPDATE assets \
             SET name = $2, description = $3, serial_number = $4, category_id = $5, status = $6, \
                 updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.serial_number)
        .bind(input.category_id)
        .bind(input.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, "Updated asset");
        Ok(repository.select_404(id).await?)
    }

    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<AssetOption>, ServiceError> {
        let options = sqlx::query_as::<_, AssetOption>(
            "SELECT id, name FROM assets WHERE name ILIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(like_pattern(term))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;
        Ok(options)
    }
}
