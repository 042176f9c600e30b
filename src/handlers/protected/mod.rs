// handlers/protected/mod.rs - Session-authenticated /api handlers
//
// Every route here sits behind `jwt_auth_middleware`, which injects the
// caller's `AuthUser`. Admin-only handlers call `require_admin` before
// touching the request body.
pub mod assets;
pub mod assignments;
pub mod categories;
pub mod contracts;
pub mod employees;
pub mod inventory;
pub mod lookups;
pub mod session;
pub mod spares;
pub mod users;

use serde::Deserialize;

use crate::api::{ApiResponse, Page};
use crate::services::ServiceError;

/// `(rows, total)` from a service as a `{ items, total }` response
pub(crate) fn page_response<T: serde::Serialize>(
    result: Result<(Vec<T>, i64), ServiceError>,
) -> Result<ApiResponse<Page<T>>, crate::error::ApiError> {
    let (items, total) = result?;
    Ok(ApiResponse::success(Page::new(items, total)))
}

/// Typeahead parameters; each search reads its own key
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub asset_name: Option<String>,
    pub category_name: Option<String>,
    pub email: Option<String>,
}
