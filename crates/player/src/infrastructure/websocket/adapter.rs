//! Desktop GameConnectionPort adapter

use anyhow::{Context, Result};

use nanotour_domain::{SessionId, UserId};
use nanotour_shared::{ClientMessage, EventKind};

use crate::config::PlayerConfig;
use crate::ports::outbound::{
    ConnectionState, GameConnectionPort, ServerEventHandler, SubscriptionId,
};

use super::client::SessionSocketClient;

/// Desktop game connection adapter
#[derive(Clone)]
pub struct DesktopGameConnection {
    client: SessionSocketClient,
}

impl DesktopGameConnection {
    pub fn new(client: SessionSocketClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: &PlayerConfig) -> Self {
        Self::new(SessionSocketClient::new(config.ws_base_url()))
    }

    /// Queue `msg`; failures are left to the caller to log
    fn send(&self, msg: ClientMessage, operation: &'static str) -> Result<()> {
        self.client
            .send(msg)
            .with_context(|| format!("Failed to {}", operation))
    }
}

impl GameConnectionPort for DesktopGameConnection {
    fn state(&self) -> ConnectionState {
        self.client.state()
    }

    fn connect(&self, user_id: &UserId) -> Result<()> {
        self.client.connect(user_id.as_str())
    }

    fn disconnect(&self) {
        self.client.disconnect();
    }

    fn join_session(&self, session_id: &SessionId) -> Result<()> {
        self.send(
            ClientMessage::JoinSession {
                session_id: session_id.to_string(),
            },
            "join session",
        )
    }

    fn start_round(&self, session_id: &SessionId) -> Result<()> {
        self.send(
            ClientMessage::StartRound {
                session_id: session_id.to_string(),
            },
            "start round",
        )
    }

    fn character_ready(&self, session_id: &SessionId) -> Result<()> {
        self.send(
            ClientMessage::CharacterReady {
                session_id: session_id.to_string(),
            },
            "announce character ready",
        )
    }

    fn on(&self, kind: EventKind, handler: ServerEventHandler) -> SubscriptionId {
        self.client.events().subscribe(kind, handler)
    }

    fn off(&self, kind: EventKind, id: SubscriptionId) -> bool {
        self.client.events().unsubscribe(kind, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn connection() -> DesktopGameConnection {
        DesktopGameConnection::new(SessionSocketClient::new(
            Url::parse("ws://127.0.0.1:9").unwrap(),
        ))
    }

    #[test]
    fn send_errors_name_the_operation() {
        let err = connection()
            .join_session(&SessionId::new("ABC123").unwrap())
            .unwrap_err();
        assert_eq!(format!("{:#}", err), "Failed to join session: Not connected");
    }

    #[test]
    fn state_follows_the_socket() {
        let connection = connection();
        assert_eq!(connection.state(), ConnectionState::Disconnected);
        connection.disconnect();
        assert_eq!(connection.state(), ConnectionState::Disconnected);
    }
}
