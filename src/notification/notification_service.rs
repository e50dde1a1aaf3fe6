use tracing::info;

use crate::websocket::{
    connection::{ConnectionId, EventSender},
    types::NotificationEvent,
    ConnectionRegistry,
};

use super::{dispatcher::EventDispatcher, reminder_scheduler::ReminderScheduler};

/// Connection lifecycle for the real-time notification channel.
///
/// Every registered connection owns its reminder timer, so disconnecting
/// and shutting down also stop the timers.
#[derive(Clone)]
pub struct NotificationService {
    registry: ConnectionRegistry,
    dispatcher: EventDispatcher,
    scheduler: ReminderScheduler,
}

impl NotificationService {
    pub fn new(
        registry: ConnectionRegistry,
        dispatcher: EventDispatcher,
        scheduler: ReminderScheduler,
    ) -> Self {
        Self {
            registry,
            dispatcher,
            scheduler,
        }
    }

    /// Register the user's channel, start its reminders and greet it.
    pub fn connect(&self, user_id: i64, sender: EventSender) -> ConnectionId {
        let reminder = self.scheduler.spawn(user_id);
        let connection_id = self.registry.register(user_id, sender, reminder);
        self.dispatcher
            .dispatch(user_id, NotificationEvent::connection_established());
        connection_id
    }

    /// Tear down the session if it is still the user's current one.
    pub fn disconnect(&self, user_id: i64, connection_id: ConnectionId) -> bool {
        self.registry.unregister_connection(user_id, connection_id)
    }

    #[cfg(test)]
    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    #[cfg(test)]
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    pub fn shutdown(&self) {
        let closed = self.registry.shutdown();
        info!("Notification service stopped, {} connections closed", closed);
    }
}
