//! Event Bus for receiving messages from the game backend.
//!
//! Subscribers register a handler for one [`EventKind`]; the socket read task
//! dispatches each decoded [`ServerMessage`] to the handlers for its kind.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use nanotour_shared::{EventKind, ServerMessage};

use crate::ports::outbound::{ServerEventHandler, SubscriptionId};

type Subscribers = HashMap<EventKind, Vec<(SubscriptionId, ServerEventHandler)>>;

/// Event bus for receiving session events.
///
/// The bus holds strong references to handlers until they are removed with
/// [`EventBus::unsubscribe`] or the bus is dropped.
#[derive(Clone, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Subscribers>>,
    next_id: Arc<AtomicU64>,
}

impl EventBus {
    /// Create a new EventBus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Subscribers> {
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn subscribe(&self, kind: EventKind, handler: ServerEventHandler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.lock().entry(kind).or_default().push((id, handler));
        id
    }

    /// Remove one handler. Returns `false` if it was not registered for `kind`.
    pub fn unsubscribe(&self, kind: EventKind, id: SubscriptionId) -> bool {
        let mut subscribers = self.lock();
        let Some(handlers) = subscribers.get_mut(&kind) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        before != handlers.len()
    }

    /// Dispatch an event to every handler registered for its kind.
    ///
    /// Handlers are cloned out first so they may subscribe or unsubscribe
    /// while running. Unknown messages are dropped.
    pub fn dispatch(&self, message: &ServerMessage) {
        let Some(kind) = message.kind() else {
            tracing::debug!("Dropping server message of unknown type");
            return;
        };

        let handlers: Vec<ServerEventHandler> = self
            .lock()
            .get(&kind)
            .map(|handlers| handlers.iter().map(|(_, h)| Arc::clone(h)).collect())
            .unwrap_or_default();

        for handler in handlers {
            handler(message);
        }
    }

    /// Get the number of subscribers for `kind`.
    pub fn subscriber_count(&self, kind: EventKind) -> usize {
        self.lock().get(&kind).map(Vec::len).unwrap_or(0)
    }

    /// Clear all subscribers.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicU32;

    fn counter(count: &Arc<AtomicU32>) -> ServerEventHandler {
        let count = Arc::clone(count);
        Arc::new(move |_event: &ServerMessage| {
            count.fetch_add(1, Ordering::SeqCst);
        })
    }

    fn battle_start() -> ServerMessage {
        ServerMessage::BattleStart {
            session_id: Some("ABC123".into()),
        }
    }

    #[test]
    fn test_subscribe_and_dispatch() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicU32::new(0));

        bus.subscribe(EventKind::BattleStart, counter(&count));
        assert_eq!(bus.subscriber_count(EventKind::BattleStart), 1);

        bus.dispatch(&battle_start());
        bus.dispatch(&battle_start());

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_dispatch_only_reaches_matching_kind() {
        let bus = EventBus::new();
        let battle = Arc::new(AtomicU32::new(0));
        let results = Arc::new(AtomicU32::new(0));

        bus.subscribe(EventKind::BattleStart, counter(&battle));
        bus.subscribe(EventKind::Results, counter(&results));

        bus.dispatch(&battle_start());
        bus.dispatch(&ServerMessage::Unknown);

        assert_eq!(battle.load(Ordering::SeqCst), 1);
        assert_eq!(results.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsubscribe_removes_only_that_handler() {
        let bus = EventBus::new();
        let first = Arc::new(AtomicU32::new(0));
        let second = Arc::new(AtomicU32::new(0));

        let id = bus.subscribe(EventKind::BattleStart, counter(&first));
        bus.subscribe(EventKind::BattleStart, counter(&second));

        assert!(!bus.unsubscribe(EventKind::Results, id));
        assert!(bus.unsubscribe(EventKind::BattleStart, id));
        assert!(!bus.unsubscribe(EventKind::BattleStart, id));

        bus.dispatch(&battle_start());

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_handler_may_unsubscribe_itself() {
        let bus = EventBus::new();
        let count = Arc::new(AtomicU32::new(0));
        let slot: Arc<Mutex<Option<SubscriptionId>>> = Arc::new(Mutex::new(None));

        let handler: ServerEventHandler = {
            let bus = bus.clone();
            let count = Arc::clone(&count);
            let slot = Arc::clone(&slot);
            Arc::new(move |_event: &ServerMessage| {
                count.fetch_add(1, Ordering::SeqCst);
                if let Some(id) = *slot.lock().unwrap() {
                    bus.unsubscribe(EventKind::BattleStart, id);
                }
            })
        };
        let id = bus.subscribe(EventKind::BattleStart, handler);
        *slot.lock().unwrap() = Some(id);

        bus.dispatch(&battle_start());
        bus.dispatch(&battle_start());

        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(bus.subscriber_count(EventKind::BattleStart), 0);
    }
}
