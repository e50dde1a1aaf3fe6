pub mod water_handlers;
pub mod water_models;
pub mod water_repository;

pub use water_handlers::{add_water_intake, get_water_intake_history, get_water_intake_summary};
