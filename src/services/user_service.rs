use sqlx::PgPool;
use uuid::Uuid;

use super::ServiceError;
use crate::api::payload::like_pattern;
use crate::api::PageRequest;
use crate::auth::{hash_password, verify_password};
use crate::database::models::{User, UserOption};
use crate::database::repository::{ensure_exists, Repository};
use crate::types::{RecordStatus, Role};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub employee_id: Option<Uuid>,
    pub status: RecordStatus,
}

/// Profile fields an update replaces. The password is never changed here.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub employee_id: Option<Uuid>,
    pub status: RecordStatus,
}

pub struct UserService<'a> {
    pool: &'a PgPool,
}

impl<'a> UserService<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    fn repository(&self) -> Repository<'a, User> {
        Repository::new(User::TABLE, self.pool)
    }

    pub async fn list(&self, page: PageRequest) -> Result<(Vec<User>, i64), ServiceError> {
        Ok(self.repository().select_page(page).await?)
    }

    pub async fn create(&self, input: NewUser) -> Result<User, ServiceError> {
        let email = normalize_email(&input.email);
        self.check_unique(&email, &input.mobile_number, input.employee_id, None)
            .await?;

        let password_hash = hash_password(&input.password)?;

        let id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users \
                 (id, email, password_hash, role, first_name, last_name, mobile_number, employee_id, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(id)
        .bind(&email)
        .bind(&password_hash)
        .bind(input.role)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.mobile_number)
        .bind(input.employee_id)
        .bind(input.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, %email, role = %input.role, "Created user");
        Ok(self.repository().select_404(id).await?)
    }

    pub async fn update(&self, id: Uuid, changes: UserChanges) -> Result<User, ServiceError> {
        let repository = self.repository();
        repository.select_404(id).await?;

        let email = normalize_email(&changes.email);
        self.check_unique(&email, &changes.mobile_number, changes.employee_id, Some(id))
            .await?;

        sqlx::query(
            "UPDATE users SET \
                 email = $2, role = $3, first_name = $4, last_name = $5, mobile_number = $6, \
                 employee_id = $7, status = $8, updated_at = now() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&email)
        .bind(changes.role)
        .bind(&changes.first_name)
        .bind(&changes.last_name)
        .bind(&changes.mobile_number)
        .bind(changes.employee_id)
        .bind(changes.status)
        .execute(self.pool)
        .await?;

        tracing::info!(%id, "Updated user");
        Ok(repository.select_404(id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let table = User::TABLE;
        let sql = format!("SELECT {} FROM {} WHERE t.email = $1", table.columns, table.from);
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(normalize_email(email))
            .fetch_optional(self.pool)
            .await?;
        Ok(user)
    }

    /// Check credentials for sign-in. Unknown, inactive and wrong-password
    /// users all fail the same way.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        let Some(user) = self.find_by_email(email).await? else {
            tracing::debug!(email, "Sign-in for unknown email");
            return Err(ServiceError::InvalidCredentials);
        };

        if !user.is_active() {
            tracing::debug!(id = %user.id, "Sign-in for inactive user");
            return Err(ServiceError::InvalidCredentials);
        }
        if !verify_password(password, &user.password_hash) {
            tracing::debug!(id = %user.id, "Sign-in with wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        Ok(user)
    }

    pub async fn search(&self, term: &str, limit: i64) -> Result<Vec<UserOption>, ServiceError> {
        let options = sqlx::query_as::<_, UserOption>(
            "SELECT id, email FROM users WHERE email ILIKE $1 ORDER BY email LIMIT $2",
        )
        .bind(like_pattern(term))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;
        Ok(options)
    }

    async fn check_unique(
        &self,
        email: &str,
        mobile_number: &str,
        employee_id: Option<Uuid>,
        exclude: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let repository = self.repository();
        if repository.value_taken("email", email, exclude).await? {
            return Err(ServiceError::conflict("User with that email already exists."));
        }
        if repository.value_taken("mobile_number", mobile_number, exclude).await? {
            return Err(ServiceError::conflict(
                "User with that mobile number already exists.",
            ));
        }

        if let Some(employee_id) = employee_id {
            ensure_exists(self.pool, "employees", "Employee", employee_id).await?;

            let linked = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS (SELECT 1 FROM users WHERE employee_id = $1 AND id IS DISTINCT FROM $2)",
            )
            .bind(employee_id)
            .bind(exclude)
            .fetch_one(self.pool)
            .await?;
            if linked {
                return Err(ServiceError::conflict("Employee is already linked to a user."));
            }
        }
        Ok(())
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Admin@Example.COM "), "admin@example.com");
    }
}
