pub mod user_handlers;
pub mod user_models;
pub mod user_repository;

pub use user_handlers::get_current_user;
pub use user_models::UserResponse;
