//! Connection state shared between the socket tasks and the port adapter.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use crate::ports::outbound::ConnectionState;

/// Convert to u8 for atomic storage.
fn to_u8(state: ConnectionState) -> u8 {
    match state {
        ConnectionState::Disconnected => 0,
        ConnectionState::Connecting => 1,
        ConnectionState::Connected => 2,
        ConnectionState::Failed => 3,
    }
}

/// Convert from u8 (atomic storage).
fn from_u8(v: u8) -> ConnectionState {
    match v {
        1 => ConnectionState::Connecting,
        2 => ConnectionState::Connected,
        3 => ConnectionState::Failed,
        _ => ConnectionState::Disconnected,
    }
}

/// Cloneable handle to a connection state cell.
///
/// All clones observe the same value.
#[derive(Debug, Clone)]
pub struct SharedConnectionState {
    state: Arc<AtomicU8>,
}

impl Default for SharedConnectionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedConnectionState {
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(to_u8(ConnectionState::Disconnected))),
        }
    }

    pub fn get(&self) -> ConnectionState {
        from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn set(&self, state: ConnectionState) {
        self.state.store(to_u8(state), Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_state_roundtrip() {
        let states = [
            ConnectionState::Disconnected,
            ConnectionState::Connecting,
            ConnectionState::Connected,
            ConnectionState::Failed,
        ];

        for state in states {
            assert_eq!(from_u8(to_u8(state)), state);
        }
    }

    #[test]
    fn test_clones_share_state() {
        let state = SharedConnectionState::new();
        let observer = state.clone();

        assert_eq!(observer.get(), ConnectionState::Disconnected);

        state.set(ConnectionState::Connected);

        assert_eq!(observer.get(), ConnectionState::Connected);
    }
}
