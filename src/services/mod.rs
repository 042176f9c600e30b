pub mod asset_service;
pub mod assignment_service;
pub mod category_service;
pub mod contract_service;
pub mod dashboard_service;
pub mod employee_service;
pub mod inventory_service;
pub mod lookup_service;
pub mod spare_service;
pub mod user_service;

pub use asset_service::{AssetInput, AssetService};
pub use assignment_service::{AssignmentScope, AssignmentService, NewAssignment};
pub use category_service::{CategoryInput, CategoryService};
pub use contract_service::{ContractInput, ContractService};
pub use dashboard_service::{DashboardService, DashboardSummary};
pub use employee_service::{EmployeeInput, EmployeeService};
pub use inventory_service::{InventoryChanges, InventoryService, NewInventory};
pub use lookup_service::{Department, Designation, EmployeeType, Location, LookupInput, LookupKind, LookupService};
pub use spare_service::{SpareInput, SpareService};
pub use user_service::{NewUser, UserChanges, UserService};

use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::error::ApiError;

/// Business-rule failures shared by every service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl ServiceError {
    pub fn invalid(message: impl Into<String>) -> Self {
        ServiceError::Invalid(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict(message.into())
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Database(DatabaseError::Sqlx(err))
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invalid(msg) => ApiError::bad_request(msg),
            ServiceError::NotFound(msg) => ApiError::not_found(msg),
            ServiceError::Conflict(msg) => ApiError::conflict(msg),
            ServiceError::InvalidCredentials => {
                ApiError::unauthorized_with(ServiceError::InvalidCredentials.to_string())
            }
            ServiceError::Auth(e) => e.into(),
            ServiceError::Database(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn service_errors_map_to_http_statuses() {
        let cases = [
            (ServiceError::invalid("bad"), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("gone"), StatusCode::NOT_FOUND),
            (ServiceError::conflict("dup"), StatusCode::CONFLICT),
            (ServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            let message = err.to_string();
            let api: ApiError = err.into();
            assert_eq!(api.status_code(), status);
            assert_eq!(api.message(), message);
        }
    }
}
