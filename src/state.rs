use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    appointment::{appointment_repository::AppointmentRepository, AppointmentService},
    auth::auth_service::AuthService,
    db::DbPool,
    doctor::doctor_repository::DoctorRepository,
    health::advisor::HealthAdvisor,
    notification::{EventDispatcher, NotificationService, ReminderScheduler},
    user::user_repository::UserRepository,
    water::water_repository::WaterIntakeRepository,
    websocket::ConnectionRegistry,
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub user_repository: UserRepository,
    pub doctor_repository: DoctorRepository,
    pub water_repository: WaterIntakeRepository,
    pub auth_service: AuthService,
    pub appointment_service: AppointmentService,
    pub health_advisor: HealthAdvisor,
    pub notifications: NotificationService,
}

impl AppState {
    /// Wires repositories and services on top of one store.
    pub fn new(config: Arc<Config>, db: DbPool) -> Self {
        let user_repository = UserRepository::new(db.clone());
        let doctor_repository = DoctorRepository::new(db.clone());
        let appointment_repository = AppointmentRepository::new(db.clone());
        let water_repository = WaterIntakeRepository::new(db);

        let registry = ConnectionRegistry::new();
        let dispatcher = EventDispatcher::new(registry.clone());

        let appointment_service = AppointmentService::new(
            appointment_repository,
            doctor_repository.clone(),
            dispatcher.clone(),
        );

        let scheduler = ReminderScheduler::new(
            Arc::new(appointment_service.clone()),
            dispatcher.clone(),
            config.reminder_interval,
            config.reminder_window_minutes,
        );
        let notifications = NotificationService::new(registry, dispatcher, scheduler);

        let auth_service = AuthService::new(
            user_repository.clone(),
            config.jwt_secret.clone(),
            config.jwt_expiration_hours,
        );

        let health_advisor = match config.openai_api_key.clone() {
            Some(api_key) => HealthAdvisor::openai(
                api_key,
                config.openai_model.clone(),
                config.openai_base_url.clone(),
            ),
            None => HealthAdvisor::RuleBased,
        };

        Self {
            config,
            user_repository,
            doctor_repository,
            water_repository,
            auth_service,
            appointment_service,
            health_advisor,
            notifications,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub reminder_interval: Duration,
    pub reminder_window_minutes: i64,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_base_url: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let reminder_interval_secs: u64 = std::env::var("REMINDER_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .context("REMINDER_INTERVAL_SECS must be a number")?;
        anyhow::ensure!(
            reminder_interval_secs > 0,
            "REMINDER_INTERVAL_SECS must be greater than zero"
        );

        Ok(Self {
            jwt_secret: std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .context("JWT_EXPIRATION_HOURS must be a number")?,
            reminder_interval: Duration::from_secs(reminder_interval_secs),
            reminder_window_minutes: std::env::var("REMINDER_WINDOW_MINUTES")
                .unwrap_or_else(|_| "1440".to_string())
                .parse()
                .context("REMINDER_WINDOW_MINUTES must be a number")?,
            openai_api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            openai_model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
        })
    }
}
