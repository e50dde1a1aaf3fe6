use crate::websocket::{types::NotificationEvent, ConnectionRegistry};

/// Hands events to the connection registry. No retries, no queueing.
#[derive(Clone)]
pub struct EventDispatcher {
    registry: ConnectionRegistry,
}

impl EventDispatcher {
    pub fn new(registry: ConnectionRegistry) -> Self {
        Self { registry }
    }

    /// Attempt delivery of one event to one user; returns whether it reached a channel.
    pub fn dispatch(&self, user_id: i64, event: NotificationEvent) -> bool {
        let kind = event.kind();
        let delivered = self.registry.send(user_id, event);
        if !delivered {
            tracing::debug!("Dropped {} for user {}: no open connection", kind, user_id);
        }
        delivered
    }
}
