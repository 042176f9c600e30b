pub mod pagination;
pub mod payload;
pub mod response;

pub use pagination::{Page, PageQuery, PageRequest};
pub use response::{ApiResponse, ApiResult};
