pub mod auth;
pub mod json;

pub use auth::{auth_middleware, authenticate, bearer_token, AuthUser};
pub use json::AppJson;
