pub mod admin;
pub mod auth;
pub mod chain;
pub mod data_errors;
pub mod debug;
pub mod response;

pub use admin::{admin_only_middleware, require_administrator};
pub use auth::{authenticate, token_auth_middleware, AuthUser};
pub use chain::{guarded, Guard};
pub use data_errors::{data_error_middleware, translate_data_failure};
pub use debug::{debug_only_middleware, require_debug_mode};
pub use response::{ApiResponse, ApiResult};
