use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceError;
use crate::api::PageRequest;
use crate::database::models::InventoryEntry;
use crate::database::repository::{ensure_exists, Repository};
use crate::types::InventoryType;

#[derive(Debug, Clone)]
pub struct NewInventory {
    pub asset_id: Uuid,
    pub inventory_type: InventoryType,
    pub quantity: i32,
    pub remarks: Option<String>,
}

/// Partial update; `None` leaves the stored value untouched.
/// `remarks: Some(None)` clears the remarks.
#[derive(Debug, Clone, Default)]
pub struct InventoryChanges {
    pub asset_id: Option<Uuid>,
    pub inventory_type: Option<InventoryType>,
    pub quantity: Option<i32>,
    pub remarks: Option<Option<String>>,
}

impl InventoryChanges {
    pub fn is_empty(&self) -> bool {
        self.asset_id.is_none()
            && self.inventory_type.is_none()
            && self.quantity.is_none()
            && self.remarks.is_none()
    }
}

pub struct InventoryService<'a> {
    pool: &'a PgPool,
}

impl<'a> InventoryService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> Repository<'a, InventoryEntry> {
        Repository::new(InventoryEntry::TABLE, self.pool)
    }

    pub async fn list(&self, page: PageRequest) -> Result<(Vec<InventoryEntry>, i64), ServiceError> {
        Ok(self.repository().select_page(page).await?)
    }

    pub async fn create(&self, input: NewInventory) -> Result<InventoryEntry, ServiceError> {
        if input.quantity == 0 {
            return Err(ServiceError::invalid("Quantity must not be zero."));
        }
        ensure_exists(self.pool, "assets", "Asset", input.asset_id).await?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO inventory (id, asset_id, inventory_type, quantity, remarks) \
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(id)
        .bind(input.asset_id)
        .bind(input.inventory_type)
        .bind(input.quantity)
        .bind(&input.remarks)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, asset_id = %input.asset_id, quantity = input.quantity, "Recorded inventory movement");
        Ok(self.repository().select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, changes: InventoryChanges) -> Result<InventoryEntry, ServiceError> {
        let repository = self.repository();
        let current = repository.select_404(id).await?;

        if changes.is_empty() {
            return Ok(current);
        }
        if changes.quantity == Some(0) {
            return Err(ServiceError::invalid("Quantity must not be zero."));
        }
        if let Some(asset_id) = changes.asset_id {
            ensure_exists(self.pool, "assets", "Asset", asset_id).await?;
        }

        let set_remarks = changes.remarks.is_some();
        sqlx::query(
            "UPDATE inventory SET \
                 asset_id = COALESCE($2, asset_id), \
                 inventory_type = COALESCE($3, inventory_type), \
                 quantity = COALESCE($4, quantity), \
                 remarks = CASE WHEN $6 THEN $5 ELSE remarks END, \
                 updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(changes.asset_id)
        .bind(changes.inventory_type)
        .bind(changes.quantity)
        .bind(changes.remarks.flatten())
        .bind(set_remarks)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, "Updated inventory movement");
        Ok(repository.select_404(id).await?)
    }
}
