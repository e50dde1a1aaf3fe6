pub mod advisor;
pub mod health_handlers;
pub mod health_models;
pub mod openai;

pub use health_handlers::{get_health_advice, get_health_tip, request_emergency};
