use chrono::{DateTime, Utc};

use crate::db::DbPool;
use crate::error::Result;
use super::appointment_models::Appointment;

#[derive(Clone)]
pub struct AppointmentRepository {
    pool: DbPool,
}

impl AppointmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: i64,
        doctor_id: i64,
        date: DateTime<Utc>,
        status: &str,
        reason: &str,
    ) -> Result<Appointment> {
        let appointment = Appointment {
            id: self.pool.next_appointment_id(),
            user_id,
            doctor_id,
            date,
            status: status.to_string(),
            reason: reason.to_string(),
        };

        self.pool
            .appointments
            .write()
            .await
            .insert(appointment.id, appointment.clone());

        Ok(appointment)
    }

    /// The user's appointments, soonest first.
    pub async fn find_all_by_user(&self, user_id: i64) -> Result<Vec<Appointment>> {
        let appointments = self.pool.appointments.read().await;
        let mut owned: Vec<Appointment> = appointments
            .values()
            .filter(|appointment| appointment.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|appointment| (appointment.date, appointment.id));
        Ok(owned)
    }
}
