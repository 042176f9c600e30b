use serde::Serialize;
use sqlx::{FromRow, PgPool};

use super::ServiceError;

/// Headline counts for the admin landing page
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub assets: i64,
    pub active_assets: i64,
    pub open_assignments: i64,
    pub employees: i64,
    pub users: i64,
    pub categories: i64,
}

pub struct DashboardService<'a> {
    pool: &'a PgPool,
}

impl<'a> DashboardService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, ServiceError> {
        let summary = sqlx::query_as::<_, DashboardSummary>(
            "SELECT \
                 (SELECT COUNT(*) FROM assets) AS assets, \
                 (SELECT COUNT(*) FROM assets WHERE status = 'ACTIVE') AS active_assets, \
                 (SELECT COUNT(*) FROM asset_assignments WHERE NOT is_returned) AS open_assignments, \
                 (SELECT COUNT(*) FROM employees) AS employees, \
                 (SELECT COUNT(*) FROM users) AS users, \
                 (SELECT COUNT(*) FROM asset_categories) AS categories",
        )
        .fetch_one(self.pool)
        .await?;
        Ok(summary)
    }
}
