pub mod doctor_handlers;
pub mod doctor_models;
pub mod doctor_repository;

pub use doctor_handlers::{get_doctor, get_doctors};
pub use doctor_models::Doctor;
