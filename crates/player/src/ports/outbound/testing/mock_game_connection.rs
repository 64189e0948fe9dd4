use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use nanotour_domain::{SessionId, UserId};
use nanotour_shared::{EventKind, ServerMessage};

use crate::ports::outbound::{
    ConnectionState, GameConnectionPort, ServerEventHandler, SubscriptionId,
};

/// Outbound call recorded by [`MockGameConnection`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentSignal {
    Connect(UserId),
    Disconnect,
    JoinSession(SessionId),
    StartRound(SessionId),
    CharacterReady(SessionId),
}

#[derive(Default)]
struct Inner {
    state: Option<ConnectionState>,
    sent: Vec<SentSignal>,
    handlers: BTreeMap<SubscriptionId, (EventKind, ServerEventHandler)>,
    next_id: u64,
    fail_sends: bool,
}

/// Recording connection double
#[derive(Clone, Default)]
pub struct MockGameConnection {
    inner: Arc<Mutex<Inner>>,
}

impl MockGameConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every outbound signal return an error
    pub fn fail_sends(&self) {
        self.lock().fail_sends = true;
    }

    pub fn sent(&self) -> Vec<SentSignal> {
        self.lock().sent.clone()
    }

    pub fn handler_count(&self) -> usize {
        self.lock().handlers.len()
    }

    /// Deliver `message` to every handler registered for its kind
    pub fn push(&self, message: ServerMessage) {
        let Some(kind) = message.kind() else {
            return;
        };
        let handlers: Vec<ServerEventHandler> = self
            .lock()
            .handlers
            .values()
            .filter(|(k, _)| *k == kind)
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in handlers {
            handler(&message);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn record(&self, signal: SentSignal) -> anyhow::Result<()> {
        let mut inner = self.lock();
        if inner.fail_sends {
            anyhow::bail!("Not connected");
        }
        inner.sent.push(signal);
        Ok(())
    }
}

impl GameConnectionPort for MockGameConnection {
    fn state(&self) -> ConnectionState {
        self.lock().state.unwrap_or(ConnectionState::Disconnected)
    }

    fn connect(&self, user_id: &UserId) -> anyhow::Result<()> {
        self.record(SentSignal::Connect(user_id.clone()))?;
        self.lock().state = Some(ConnectionState::Connected);
        Ok(())
    }

    fn disconnect(&self) {
        let mut inner = self.lock();
        inner.sent.push(SentSignal::Disconnect);
        inner.state = Some(ConnectionState::Disconnected);
    }

    fn join_session(&self, session_id: &SessionId) -> anyhow::Result<()> {
        self.record(SentSignal::JoinSession(session_id.clone()))
    }

    fn start_round(&self, session_id: &SessionId) -> anyhow::Result<()> {
        self.record(SentSignal::StartRound(session_id.clone()))
    }

    fn character_ready(&self, session_id: &SessionId) -> anyhow::Result<()> {
        self.record(SentSignal::CharacterReady(session_id.clone()))
    }

    fn on(&self, kind: EventKind, handler: ServerEventHandler) -> SubscriptionId {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.handlers.insert(id, (kind, handler));
        id
    }

    fn off(&self, kind: EventKind, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        match inner.handlers.get(&id) {
            Some((k, _)) if *k == kind => inner.handlers.remove(&id).is_some(),
            _ => false,
        }
    }
}
