//! Asset issue and return.
//!
//! An assignment starts open and may be returned exactly once. Users with
//! the USER role only ever see or return their own assignments.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceError;
use crate::api::PageRequest;
use crate::database::models::AssetAssignment;
use crate::database::repository::{ensure_exists, Repository};

const ALREADY_RETURNED: &str = "Asset has already been returned.";

/// Which assignments a caller may see and return
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssignmentScope {
    All,
    /// Only assignments whose user has this email
    OwnedBy(String),
}

impl AssignmentScope {
    fn permits(&self, assignment: &AssetAssignment) -> bool {
        match self {
            AssignmentScope::All => true,
            AssignmentScope::OwnedBy(email) => assignment.assigned_to.email.eq_ignore_ascii_case(email),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub user_id: Uuid,
    pub asset_id: Uuid,
    pub issue_date: DateTime<Utc>,
}

pub struct AssignmentService<'a> {
    pool: &'a PgPool,
}

impl<'a> AssignmentService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> Repository<'a, AssetAssignment> {
        Repository::new(AssetAssignment::TABLE, self.pool)
    }

    pub async fn list(
        &self,
        scope: &AssignmentScope,
        page: PageRequest,
    ) -> Result<(Vec<AssetAssignment>, i64), ServiceError> {
        let email = match scope {
            AssignmentScope::All => return Ok(self.repository().select_page(page).await?),
            AssignmentScope::OwnedBy(email) => email,
        };

        let table = AssetAssignment::TABLE;
        let sql = format!(
            "SELECT {} FROM {} WHERE u.email = $3 ORDER BY {} LIMIT $1 OFFSET $2",
            table.columns, table.from, table.order_by
        );
        let rows = sqlx::query_as::<_, AssetAssignment>(&sql)
            .bind(page.limit)
            .bind(page.skip)
            .bind(email)
            .fetch_all(self.pool);
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM asset_assignments t JOIN users u ON u.id = t.user_id \
             WHERE u.email = $1",
        )
        .bind(email)
        .fetch_one(self.pool);

        let (rows, total) = tokio::try_join!(rows, total)?;
        Ok((rows, total))
    }

    /// Open assignments for one user, newest first
    pub async fn open_for(&self, email: &str) -> Result<Vec<AssetAssignment>, ServiceError> {
        let table = AssetAssignment::TABLE;
        let sql = format!(
            "SELECT {} FROM {} WHERE u.email = $1 AND NOT t.is_returned ORDER BY t.issue_date DESC",
            table.columns, table.from
        );
        let rows = sqlx::query_as::<_, AssetAssignment>(&sql)
            .bind(email)
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn create(&self, input: NewAssignment) -> Result<AssetAssignment, ServiceError> {
        ensure_exists(self.pool, "users", "User", input.user_id).await?;
        ensure_exists(self.pool, "assets", "Asset", input.asset_id).await?;

        let issued = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM asset_assignments WHERE asset_id = $1 AND NOT is_returned)",
        )
        .bind(input.asset_id)
        .fetch_one(self.pool)
        .await?;
        if issued {
            return Err(ServiceError::conflict("Asset is already assigned."));
        }

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO asset_assignments (id, user_id, asset_id, issue_date, is_returned) \
             VALUES ($1, $2, $3, $4, false)",
        )
        .bind(id)
        .bind(input.user_id)
        .bind(input.asset_id)
        .bind(input.issue_date)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, user_id = %input.user_id, asset_id = %input.asset_id, "Issued asset");
        Ok(self.repository().select_404(id).await?)
    }

    /// Close an open assignment, stamping the return date with server time
    pub async fn return_asset(
        &self,
        id: Uuid,
        reason: Option<String>,
        scope: &AssignmentScope,
    ) -> Result<AssetAssignment, ServiceError> {
        let repository = self.repository();
        let not_found = || ServiceError::not_found("Asset assignment not found.");

        let assignment = repository.select_one(id).await?.ok_or_else(not_found)?;
        if !scope.permits(&assignment) {
            return Err(not_found());
        }
        if assignment.is_returned {
            return Err(ServiceError::conflict(ALREADY_RETURNED));
        }

        let result = sqlx::query(
            "UPDATE asset_assignments \
             SET is_returned = true, return_date = now(), return_reason = $2, updated_at = now() \
             WHERE id = $1 AND NOT is_returned",
        )
        .bind(id)
        .bind(&reason)
        .execute(self.pool)
        .await?;

        // Lost a race with a concurrent return
        if result.rows_affected() == 0 {
            return Err(ServiceError::conflict(ALREADY_RETURNED));
        }

        tracing::info!(%id, "Returned asset");
        Ok(repository.select_404(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{AssignedAsset, AssignedUser};

    fn assignment(email: &str) -> AssetAssignment {
        let now = Utc::now();
        AssetAssignment {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            asset_id: Uuid::new_v4(),
            issue_date: now,
            return_date: None,
            return_reason: None,
            is_returned: false,
            created_at: now,
            updated_at: now,
            assigned_to: AssignedUser {
                id: Uuid::new_v4(),
                email: email.to_string(),
            },
            assigned_asset: AssignedAsset {
                id: Uuid::new_v4(),
                name: "Laptop".to_string(),
                serial_number: "SN-1".to_string(),
            },
        }
    }

    #[test]
    fn owner_scope_only_permits_own_assignments() {
        let mine = assignment("user@example.com");
        let theirs = assignment("other@example.com");
        let scope = AssignmentScope::OwnedBy("user@example.com".to_string());

        assert!(scope.permits(&mine));
        assert!(!scope.permits(&theirs));
        assert!(AssignmentScope::All.permits(&theirs));
    }

    #[test]
    fn assignment_serializes_nested_user_and_asset() {
        let value = serde_json::to_value(assignment("user@example.com")).unwrap();
        assert_eq!(value["assignedTo"]["email"], "user@example.com");
        assert_eq!(value["assignedAsset"]["serialNumber"], "SN-1");
        assert_eq!(value["isReturned"], false);
        assert!(value["returnDate"].is_null());
    }
}
