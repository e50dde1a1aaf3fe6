use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, warn};

use crate::appointment::appointment_models::Appointment;
use crate::error::Result;
use crate::websocket::types::NotificationEvent;

use super::dispatcher::EventDispatcher;

/// Where a scheduler tick reads a user's appointments from.
#[async_trait]
pub trait AppointmentSource: Send + Sync {
    async fn user_appointments(&self, user_id: i64) -> Result<Vec<Appointment>>;
}

/// Owned handle to one user's running reminder timer.
///
/// The timer stops when the handle is cancelled or dropped.
#[derive(Debug)]
pub struct ReminderHandle {
    user_id: i64,
    task: JoinHandle<()>,
}

impl ReminderHandle {
    pub fn new(user_id: i64, task: JoinHandle<()>) -> Self {
        Self { user_id, task }
    }

    /// Stop the timer now. A tick already in flight is abandoned.
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for ReminderHandle {
    fn drop(&mut self) {
        self.task.abort();
        debug!("Reminder timer stopped for user {}", self.user_id);
    }
}

/// Per-user recurring check for appointments inside the reminder window.
#[derive(Clone)]
pub struct ReminderScheduler {
    source: Arc<dyn AppointmentSource>,
    dispatcher: EventDispatcher,
    interval: Duration,
    window_minutes: i64,
}

impl ReminderScheduler {
    pub fn new(
        source: Arc<dyn AppointmentSource>,
        dispatcher: EventDispatcher,
        interval: Duration,
        window_minutes: i64,
    ) -> Self {
        Self {
            source,
            dispatcher,
            interval,
            window_minutes,
        }
    }

    /// Start the user's timer. The first tick fires one interval from now.
    pub fn spawn(&self, user_id: i64) -> ReminderHandle {
        let scheduler = self.clone();
        let task = tokio::spawn(async move { scheduler.run(user_id).await });
        debug!("Reminder timer started for user {} every {:?}", user_id, self.interval);
        ReminderHandle::new(user_id, task)
    }

    async fn run(self, user_id: i64) {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.tick(user_id).await;
        }
    }

    /// One pass over the user's appointments. Returns the number of reminders dispatched.
    ///
    /// A failed fetch skips this pass only; the timer keeps running.
    pub async fn tick(&self, user_id: i64) -> usize {
        let appointments = match self.source.user_appointments(user_id).await {
            Ok(appointments) => appointments,
            Err(e) => {
                warn!("Skipping reminder tick for user {}: {}", user_id, e);
                return 0;
            }
        };

        let reminders = due_reminders(&appointments, Utc::now(), self.window_minutes);
        let count = reminders.len();
        for event in reminders {
            self.dispatcher.dispatch(user_id, event);
        }
        count
    }
}

/// Reminders for appointments starting within `(0, window_minutes]` whole minutes of `now`.
///
/// Stateless: an appointment inside the window yields a reminder on every call.
pub fn due_reminders(
    appointments: &[Appointment],
    now: DateTime<Utc>,
    window_minutes: i64,
) -> Vec<NotificationEvent> {
    appointments
        .iter()
        .filter_map(|appointment| {
            let minutes_until = (appointment.date - now).num_minutes();
            (minutes_until > 0 && minutes_until <= window_minutes)
                .then(|| NotificationEvent::appointment_reminder(appointment.clone(), minutes_until))
        })
        .collect()
}
