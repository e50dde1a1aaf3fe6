use async_trait::async_trait;
use chrono::Utc;
use validator::Validate;

use crate::doctor::doctor_repository::DoctorRepository;
use crate::error::{AppError, Result};
use crate::notification::{AppointmentSource, EventDispatcher};
use crate::websocket::types::NotificationEvent;

use super::{
    appointment_dto::CreateAppointmentRequest,
    appointment_models::{Appointment, AppointmentStatus},
    appointment_repository::AppointmentRepository,
};

/// Appointment booking. Creation notifies the owner's live connection.
#[derive(Clone)]
pub struct AppointmentService {
    repo: AppointmentRepository,
    doctor_repo: DoctorRepository,
    dispatcher: EventDispatcher,
}

impl AppointmentService {
    pub fn new(
        repo: AppointmentRepository,
        doctor_repo: DoctorRepository,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            repo,
            doctor_repo,
            dispatcher,
        }
    }

    pub async fn get_user_appointments(&self, user_id: i64) -> Result<Vec<Appointment>> {
        self.repo.find_all_by_user(user_id).await
    }

    /// Store the appointment, then push `appointment_created` to the owner.
    ///
    /// The push is fire-and-forget: an offline owner does not fail the booking.
    pub async fn create_appointment(
        &self,
        user_id: i64,
        payload: CreateAppointmentRequest,
    ) -> Result<Appointment> {
        payload.validate()?;

        if payload.date <= Utc::now() {
            return Err(AppError::Validation(
                "Appointment date must be in the future".to_string(),
            ));
        }

        let status = match payload.status.as_deref() {
            Some(status) => status
                .parse::<AppointmentStatus>()
                .map_err(AppError::Validation)?,
            None => AppointmentStatus::Scheduled,
        };

        if self.doctor_repo.find_by_id(payload.doctor_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Doctor {} does not exist",
                payload.doctor_id
            )));
        }

        let appointment = self
            .repo
            .create(
                user_id,
                payload.doctor_id,
                payload.date,
                &status.to_string(),
                &payload.reason,
            )
            .await?;

        tracing::info!(
            "Appointment {} booked for user {} with doctor {}",
            appointment.id,
            user_id,
            appointment.doctor_id
        );

        self.dispatcher
            .dispatch(user_id, NotificationEvent::appointment_created(appointment.clone()));

        Ok(appointment)
    }
}

#[async_trait]
impl AppointmentSource for AppointmentService {
    async fn user_appointments(&self, user_id: i64) -> Result<Vec<Appointment>> {
        self.get_user_appointments(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, seed_doctors};
    use crate::notification::ReminderHandle;
    use crate::websocket::ConnectionRegistry;
    use chrono::Duration;
    use tokio::sync::mpsc;

    async fn service() -> (AppointmentService, ConnectionRegistry) {
        let pool = create_pool();
        seed_doctors(&pool).await;
        let registry = ConnectionRegistry::new();
        let service = AppointmentService::new(
            AppointmentRepository::new(pool.clone()),
            DoctorRepository::new(pool),
            EventDispatcher::new(registry.clone()),
        );
        (service, registry)
    }

    fn request(minutes_ahead: i64) -> CreateAppointmentRequest {
        CreateAppointmentRequest {
            doctor_id: 1,
            date: Utc::now() + Duration::minutes(minutes_ahead),
            reason: "checkup".to_string(),
            status: None,
        }
    }

    #[tokio::test]
    async fn test_create_without_connection_still_succeeds() {
        let (service, _registry) = service().await;

        let appointment = service.create_appointment(7, request(30)).await.unwrap();

        assert_eq!(appointment.user_id, 7);
        assert_eq!(appointment.status, "scheduled");
        assert_eq!(service.get_user_appointments(7).await.unwrap(), vec![appointment]);
    }

    #[tokio::test]
    async fn test_create_notifies_live_connection() {
        let (service, registry) = service().await;
        let (tx, mut rx) = mpsc::unbounded_channel();
        let idle = tokio::spawn(std::future::pending::<()>());
        registry.register(7, tx, ReminderHandle::new(7, idle));

        let appointment = service.create_appointment(7, request(30)).await.unwrap();

        let event = rx.try_recv().expect("appointment_created dispatched synchronously");
        assert_eq!(event, NotificationEvent::appointment_created(appointment));
    }

    #[tokio::test]
    async fn test_past_date_rejected() {
        let (service, _registry) = service().await;
        let err = service.create_appointment(7, request(-5)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_doctor_rejected() {
        let (service, _registry) = service().await;
        let mut payload = request(30);
        payload.doctor_id = 99;

        let err = service.create_appointment(7, payload).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
        assert!(service.get_user_appointments(7).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_appointments_are_per_user() {
        let (service, _registry) = service().await;
        service.create_appointment(1, request(60)).await.unwrap();
        service.create_appointment(2, request(30)).await.unwrap();
        service.create_appointment(1, request(10)).await.unwrap();

        let mine = service.get_user_appointments(1).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine[0].date < mine[1].date);
    }
}
