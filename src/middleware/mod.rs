pub mod auth;
pub mod response;

pub use auth::{jwt_auth_middleware, jwt_context_middleware, AuthUser};
pub use response::{ApiResponse, ApiResult};
