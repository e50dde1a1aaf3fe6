use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::notification::ReminderHandle;

use super::types::NotificationEvent;

pub type EventSender = mpsc::UnboundedSender<NotificationEvent>;

/// Distinguishes successive sessions of the same user.
pub type ConnectionId = u64;

/// One live session. Dropping it releases the channel and cancels the
/// user's reminder timer.
struct Connection {
    id: ConnectionId,
    sender: EventSender,
    reminder: ReminderHandle,
}

/// Maps a user id to its single live notification channel.
///
/// Delivery is best effort: events for users without an open channel are
/// dropped, never queued or retried.
#[derive(Clone)]
pub struct ConnectionRegistry {
    connections: Arc<DashMap<i64, Connection>>,
    next_id: Arc<AtomicU64>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Store the user's channel together with its reminder timer.
    ///
    /// A previous connection for the same user is dropped, which ends its
    /// socket writer and cancels its timer.
    pub fn register(
        &self,
        user_id: i64,
        sender: EventSender,
        reminder: ReminderHandle,
    ) -> ConnectionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let previous = self.connections.insert(
            user_id,
            Connection {
                id,
                sender,
                reminder,
            },
        );

        if let Some(previous) = previous {
            tracing::info!(
                "User {} reconnected, replacing connection {} with {}",
                user_id,
                previous.id,
                id
            );
            previous.reminder.cancel();
        } else {
            tracing::info!(
                "User {} connected via WebSocket ({} online)",
                user_id,
                self.online_count()
            );
        }

        id
    }

    /// Remove the user's connection, whichever session it belongs to, and
    /// cancel its reminder timer. Unknown users are a no-op.
    pub fn unregister(&self, user_id: i64) -> bool {
        match self.connections.remove(&user_id) {
            Some((_, connection)) => {
                self.closed(user_id, connection);
                true
            }
            None => false,
        }
    }

    /// Remove the user's connection only if it is still `connection_id`.
    pub fn unregister_connection(&self, user_id: i64, connection_id: ConnectionId) -> bool {
        match self
            .connections
            .remove_if(&user_id, |_, connection| connection.id == connection_id)
        {
            Some((_, connection)) => {
                self.closed(user_id, connection);
                true
            }
            None => false,
        }
    }

    fn closed(&self, user_id: i64, connection: Connection) {
        connection.reminder.cancel();
        tracing::info!(
            "User {} disconnected from WebSocket ({} online)",
            user_id,
            self.online_count()
        );
    }

    /// Hand an event to the user's channel. Returns false when it was dropped.
    pub fn send(&self, user_id: i64, event: NotificationEvent) -> bool {
        match self.connections.get(&user_id) {
            Some(connection) if !connection.sender.is_closed() => {
                connection.sender.send(event).is_ok()
            }
            _ => false,
        }
    }

    #[cfg(test)]
    pub fn is_connected(&self, user_id: i64) -> bool {
        self.connections
            .get(&user_id)
            .map(|connection| !connection.sender.is_closed())
            .unwrap_or(false)
    }

    pub fn online_count(&self) -> usize {
        self.connections.len()
    }

    /// Drop every connection. Returns how many were closed.
    pub fn shutdown(&self) -> usize {
        let user_ids: Vec<i64> = self.connections.iter().map(|entry| *entry.key()).collect();
        user_ids
            .into_iter()
            .filter(|user_id| self.unregister(*user_id))
            .count()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    /// A reminder whose task ends (dropping `guard`) only when cancelled.
    fn watched_reminder(user_id: i64) -> (ReminderHandle, oneshot::Receiver<()>) {
        let (guard, cancelled) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let _guard = guard;
            std::future::pending::<()>().await;
        });
        (ReminderHandle::new(user_id, task), cancelled)
    }

    async fn assert_cancelled(cancelled: oneshot::Receiver<()>) {
        let result = tokio::time::timeout(Duration::from_secs(1), cancelled)
            .await
            .expect("reminder task was not cancelled");
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_send_without_connection_is_noop() {
        let registry = ConnectionRegistry::new();
        assert!(!registry.send(42, NotificationEvent::connection_established()));
        assert!(!registry.unregister_connection(42, 1));
    }

    #[tokio::test]
    async fn test_send_reaches_registered_channel() {
        let registry = ConnectionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (reminder, _cancelled) = watched_reminder(7);

        registry.register(7, tx, reminder);

        assert!(registry.is_connected(7));
        assert!(registry.send(7, NotificationEvent::connection_established()));
        assert_eq!(rx.recv().await, Some(NotificationEvent::connection_established()));
    }

    #[tokio::test]
    async fn test_events_never_cross_users() {
        let registry = ConnectionRegistry::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let (reminder_a, _a) = watched_reminder(1);
        let (reminder_b, _b) = watched_reminder(2);
        registry.register(1, tx_a, reminder_a);
        registry.register(2, tx_b, reminder_b);

        assert!(registry.send(1, NotificationEvent::connection_established()));

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unregister_cancels_reminder() {
        let registry = ConnectionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (reminder, cancelled) = watched_reminder(7);

        let connection_id = registry.register(7, tx, reminder);
        assert!(registry.unregister_connection(7, connection_id));

        assert_cancelled(cancelled).await;
        assert!(!registry.is_connected(7));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_unregister_by_user_id() {
        let registry = ConnectionRegistry::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (other_tx, _other_rx) = mpsc::unbounded_channel();
        let (reminder, cancelled) = watched_reminder(7);
        let (other_reminder, _other_cancelled) = watched_reminder(8);
        registry.register(7, tx, reminder);
        registry.register(8, other_tx, other_reminder);

        assert!(!registry.unregister(99));
        assert_eq!(registry.online_count(), 2);

        assert!(registry.unregister(7));
        assert_cancelled(cancelled).await;
        assert_eq!(rx.recv().await, None);

        assert!(!registry.unregister(7));
        assert!(registry.is_connected(8));
        assert_eq!(registry.online_count(), 1);
    }

    #[tokio::test]
    async fn test_reregister_replaces_and_closes_previous() {
        let registry = ConnectionRegistry::new();
        let (old_tx, mut old_rx) = mpsc::unbounded_channel();
        let (new_tx, mut new_rx) = mpsc::unbounded_channel();
        let (old_reminder, old_cancelled) = watched_reminder(7);
        let (new_reminder, _new_cancelled) = watched_reminder(7);

        let old_id = registry.register(7, old_tx, old_reminder);
        let new_id = registry.register(7, new_tx, new_reminder);
        assert_ne!(old_id, new_id);

        assert_cancelled(old_cancelled).await;
        assert_eq!(old_rx.recv().await, None);

        // the stale session closing must not evict its replacement
        assert!(!registry.unregister_connection(7, old_id));
        assert!(registry.send(7, NotificationEvent::connection_established()));
        assert!(new_rx.recv().await.is_some());

        assert!(registry.unregister_connection(7, new_id));
        assert_eq!(registry.online_count(), 0);
    }

    #[tokio::test]
    async fn test_closed_channel_drops_events() {
        let registry = ConnectionRegistry::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let (reminder, _cancelled) = watched_reminder(7);
        registry.register(7, tx, reminder);

        drop(rx);

        assert!(!registry.is_connected(7));
        assert!(!registry.send(7, NotificationEvent::connection_established()));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_everything() {
        let registry = ConnectionRegistry::new();
        let mut watchers = Vec::new();
        for user_id in 1..=3 {
            let (tx, _rx) = mpsc::unbounded_channel();
            let (reminder, cancelled) = watched_reminder(user_id);
            registry.register(user_id, tx, reminder);
            watchers.push(cancelled);
        }

        assert_eq!(registry.shutdown(), 3);
        assert_eq!(registry.online_count(), 0);
        for cancelled in watchers {
            assert_cancelled(cancelled).await;
        }
    }
}
