pub mod auth;
pub mod gatekeeper;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use gatekeeper::page_gatekeeper;
