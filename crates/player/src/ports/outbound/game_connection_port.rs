//! Game Connection Port - Outbound port for backend WebSocket operations
//!
//! This port abstracts the session event stream: a handful of fire-and-forget
//! signals going out, and per-kind subscriptions for events coming in.

use std::sync::Arc;

use nanotour_domain::{SessionId, UserId};
use nanotour_shared::{EventKind, ServerMessage};

/// Connection state for the event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Not connected to the server
    Disconnected,
    /// Attempting to establish connection
    Connecting,
    /// Successfully connected
    Connected,
    /// Connection failed
    Failed,
}

/// Callback invoked for each matching server event.
///
/// Handlers run on the socket's read task; keep them short and hand work off
/// through a channel.
pub type ServerEventHandler = Arc<dyn Fn(&ServerMessage) + Send + Sync>;

/// Handle returned by [`GameConnectionPort::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// WebSocket boundary used by the session screen
///
/// NOTE: This trait is intentionally **object-safe** so the presentation layer can
/// store an `Arc<dyn GameConnectionPort>` without depending on concrete
/// infrastructure types.
pub trait GameConnectionPort: Send + Sync {
    /// Get the current connection state
    fn state(&self) -> ConnectionState;

    /// Open the event stream for `user_id`.
    ///
    /// Returns immediately; the socket opens in the background. Signals sent
    /// before it opens are queued and flushed once connected.
    fn connect(&self, user_id: &UserId) -> anyhow::Result<()>;

    /// Close the event stream. Subscriptions survive a disconnect.
    fn disconnect(&self);

    /// Subscribe this socket to a session's broadcasts
    fn join_session(&self, session_id: &SessionId) -> anyhow::Result<()>;

    /// Ask the backend to start the round
    fn start_round(&self, session_id: &SessionId) -> anyhow::Result<()>;

    /// Announce that our character is ready
    fn character_ready(&self, session_id: &SessionId) -> anyhow::Result<()>;

    /// Register `handler` for events of `kind`
    fn on(&self, kind: EventKind, handler: ServerEventHandler) -> SubscriptionId;

    /// Remove a handler; returns whether it was registered
    fn off(&self, kind: EventKind, id: SubscriptionId) -> bool;
}
