use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceError;
use crate::api::payload::like_pattern;
use crate::api::PageRequest;
use crate::database::models::{AssetCategory, CategoryOption};
use crate::database::repository::Repository;
use crate::types::RecordStatus;

const DUPLICATE_MESSAGE: &str = "Category name already exists.";
const PARENT_NOT_FOUND: &str = "Parent category not found.";

#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub parent_category_id: Option<Uuid>,
    pub status: RecordStatus,
}

pub struct CategoryService<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> Repository<'a, AssetCategory> {
        Repository::new(AssetCategory::TABLE, self.pool)
    }

    pub async fn list(&self, page: PageRequest) -> Result<(Vec<AssetCategory>, i64), ServiceError> {
        Ok(self.repository().select_page(page).await?)
    }

    pub async fn create(&self, input: CategoryInput) -> Result<AssetCategory, ServiceError> {
        let repository = self.repository();
        if repository.value_taken("name", &input.name, None).await? {
            return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
        }
        if let Some(parent_id) = input.parent_category_id {
            self.ensure_parent(parent_id).await?;
        }

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO asset_categories (id, name, description, parent_category_id, status) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.parent_category_id)
        .bind(input.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, name = %input.name, "Created asset category");
        Ok(repository.select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, input: CategoryInput) -> Result<AssetCategory, ServiceError> {
        let repository = self.repository();
        repository.select_404(id).await?;

        if repository.value_taken("name", &input.name, Some(id)).await? {
            return Err(ServiceError::conflict(DUPLICATE_MESSAGE));
        }
        if let Some(parent_id) = input.parent_category_id {
            if parent_id == id {
                return Err(ServiceError::invalid("A category cannot be its own parent."));
            }
            self.ensure_parent(parent_id).await?;
            if self.is_ancestor(id, parent_id).await? {
                return Err(ServiceError::invalid(
                    "Parent category would create a cycle.",
                ));
            }
        }

        sqlx::query(
            "UPDATE asset_categories \
             SET name = $2, description = $3, parent_category_id = $4, status = $5, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.parent_category_id)
        .bind(input.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, "Updated asset category");
        Ok(repository.select_404(id).await?)
    }

    /// Case-insensitive name match, alphabetical
    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<CategoryOption>, ServiceError> {
        let options = sqlx::query_as::<_, CategoryOption>(
            "SELECT id, name FROM asset_categories WHERE name ILIKE $1 ORDER BY name LIMIT $2",
        )
        .bind(like_pattern(term))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;
        Ok(options)
    }

    async fn ensure_parent(&self, parent_id: Uuid) -> Result<(), ServiceError> {
        match self.repository().select_one(parent_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::not_found(PARENT_NOT_FOUND)),
        }
    }

    /// Walks up from `start` and reports whether `category_id` is on the path
    async fn is_ancestor(&self, category_id: Uuid, start: Uuid) -> Result<bool, ServiceError> {
        let found = sqlx::query_scalar::<_, bool>(
            "WITH RECURSIVE chain(id, parent_category_id) AS ( \
                 SELECT id, parent_category_id FROM asset_categories WHERE id = $1 \
                 UNION \
                 SELECT c.id, c.parent_category_id \
                 FROM asset_categories c JOIN chain ON c.id = chain.parent_category_id \
             ) \
             SELECT EXISTS (SELECT 1 FROM chain WHERE id = $2)",
        )
        .bind(start)
        .bind(category_id)
        .fetch_one(self.pool)
        .await?;
        Ok(found)
    }
}
