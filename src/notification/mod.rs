pub mod dispatcher;
pub mod notification_service;
pub mod reminder_scheduler;

pub use dispatcher::EventDispatcher;
pub use notification_service::NotificationService;
pub use reminder_scheduler::{AppointmentSource, ReminderHandle, ReminderScheduler};
