pub mod appointment_dto;
pub mod appointment_handlers;
pub mod appointment_models;
pub mod appointment_repository;
pub mod appointment_service;

pub use appointment_handlers::{create_appointment, get_appointments};
pub use appointment_models::{Appointment, AppointmentStatus};
pub use appointment_service::AppointmentService;
