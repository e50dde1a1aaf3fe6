use serde::{Deserialize, Serialize};

use crate::appointment::appointment_models::Appointment;

/// Server-to-client envelope: `{ "type": ..., "data": { "message", "appointment"? } }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NotificationEvent {
    ConnectionEstablished(EventPayload),
    AppointmentCreated(EventPayload),
    AppointmentReminder(EventPayload),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventPayload {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment: Option<Appointment>,
}

impl NotificationEvent {
    pub fn connection_established() -> Self {
        NotificationEvent::ConnectionEstablished(EventPayload {
            message: "Connected to notification service".to_string(),
            appointment: None,
        })
    }

    pub fn appointment_created(appointment: Appointment) -> Self {
        NotificationEvent::AppointmentCreated(EventPayload {
            message: "New appointment scheduled successfully".to_string(),
            appointment: Some(appointment),
        })
    }

    pub fn appointment_reminder(appointment: Appointment, minutes_until: i64) -> Self {
        NotificationEvent::AppointmentReminder(EventPayload {
            message: format!("Upcoming appointment in {} minutes", minutes_until),
            appointment: Some(appointment),
        })
    }

    /// Wire name of the variant, used for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            NotificationEvent::ConnectionEstablished(_) => "connection_established",
            NotificationEvent::AppointmentCreated(_) => "appointment_created",
            NotificationEvent::AppointmentReminder(_) => "appointment_reminder",
        }
    }

    #[cfg(test)]
    pub fn payload(&self) -> &EventPayload {
        match self {
            NotificationEvent::ConnectionEstablished(payload)
            | NotificationEvent::AppointmentCreated(payload)
            | NotificationEvent::AppointmentReminder(payload) => payload,
        }
    }
}
