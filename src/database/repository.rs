use sqlx::{postgres::PgRow, FromRow, PgPool};
use uuid::Uuid;

use crate::api::PageRequest;
use crate::database::manager::DatabaseError;

/// Static description of how an entity is read.
///
/// `from` must alias the base table as `t`; every identifier here is a
/// compile-time constant, never user input.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    /// Base table name, used for existence checks
    pub name: &'static str,
    /// FROM clause including joins
    pub from: &'static str,
    pub columns: &'static str,
    pub order_by: &'static str,
    /// Human label used in not-found messages, e.g. "Department"
    pub label: &'static str,
}

impl Table {
    /// Plain single-table source with the standard ordering
    pub const fn simple(name: &'static str, from: &'static str, columns: &'static str, label: &'static str) -> Self {
        Self {
            name,
            from,
            columns,
            order_by: "t.created_at DESC",
            label,
        }
    }
}

pub struct Repository<'p, T> {
    table: Table,
    pool: &'p PgPool,
    _phantom: std::marker::PhantomData<T>,
}

impl<'p, T> Repository<'p, T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table: Table, pool: &'p PgPool) -> Self {
        Self {
            table,
            pool,
            _phantom: std::marker::PhantomData,
        }
    }

    /// One page of rows plus the unfiltered total, fetched concurrently
    pub async fn select_page(&self, page: PageRequest) -> Result<(Vec<T>, i64), DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY {} LIMIT $1 OFFSET $2",
            self.table.columns, self.table.from, self.table.order_by
        );
        let rows = sqlx::query_as::<_, T>(&sql)
            .bind(page.limit)
            .bind(page.skip)
            .fetch_all(self.pool);

        let (rows, total) = tokio::try_join!(rows, self.count())?;
        Ok((rows, total))
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.table.name);
        sqlx::query_scalar::<_, i64>(&sql).fetch_one(self.pool).await
    }

    pub async fn select_one(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE t.id = $1",
            self.table.columns, self.table.from
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Like `select_one` but a missing row is `DatabaseError::NotFound`
    pub async fn select_404(&self, id: Uuid) -> Result<T, DatabaseError> {
        self.select_one(id)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("{} not found.", self.table.label)))
    }

    /// Whether another row already holds `value` in `column`
    pub async fn value_taken(
        &self,
        column: &'static str,
        value: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<bool, DatabaseError> {
        let sql = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE {} = $1 AND id IS DISTINCT FROM $2)",
            self.table.name, column
        );
        let taken = sqlx::query_scalar::<_, bool>(&sql)
            .bind(value)
            .bind(exclude_id)
            .fetch_one(self.pool)
            .await?;
        Ok(taken)
    }
}

/// Check that a referenced row exists, producing "<label> not found."
pub async fn ensure_exists(
    pool: &PgPool,
    table: &'static str,
    label: &str,
    id: Uuid,
) -> Result<(), DatabaseError> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", table);
    let found = sqlx::query_scalar::<_, bool>(&sql)
        .bind(id)
        .fetch_one(pool)
        .await?;
    if found {
        Ok(())
    } else {
        Err(DatabaseError::NotFound(format!("{} not found.", label)))
    }
}
