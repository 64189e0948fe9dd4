//! Desktop WebSocket client using tokio-tungstenite

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};
use url::Url;

use nanotour_shared::{ClientMessage, ServerMessage};

use crate::infrastructure::messaging::{EventBus, SharedConnectionState};
use crate::ports::outbound::ConnectionState;

use super::shared::session_socket_url;

type Outbox = mpsc::UnboundedSender<ClientMessage>;

/// WebSocket client for the backend's session event stream (Desktop)
///
/// One socket at a time. `connect` returns immediately and the socket opens
/// on a background task; messages sent in the meantime wait in the outbox.
/// A dropped connection is not re-established.
#[derive(Clone)]
pub struct SessionSocketClient {
    base_url: Url,
    state: SharedConnectionState,
    events: EventBus,
    outbox: Arc<Mutex<Option<Outbox>>>,
    /// Bumped on every connect/disconnect so a superseded socket task
    /// never overwrites the state of the current one
    generation: Arc<AtomicU64>,
}

impl SessionSocketClient {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            state: SharedConnectionState::new(),
            events: EventBus::new(),
            outbox: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    fn outbox(&self) -> MutexGuard<'_, Option<Outbox>> {
        self.outbox.lock().unwrap_or_else(|p| p.into_inner())
    }

    /// Open a socket for `user_id`, replacing any existing one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn connect(&self, user_id: &str) -> Result<()> {
        let runtime = tokio::runtime::Handle::try_current()
            .context("WebSocket connect requires a tokio runtime")?;

        let url = session_socket_url(&self.base_url, user_id);
        let (tx, rx) = mpsc::unbounded_channel();
        // Dropping the previous sender ends the previous socket's write task
        *self.outbox() = Some(tx);
        let id = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.set(ConnectionState::Connecting);

        runtime.spawn(run_connection(
            url,
            rx,
            self.events.clone(),
            self.state.clone(),
            Arc::clone(&self.generation),
            id,
        ));
        Ok(())
    }

    /// Queue a message. Fails when no socket has been opened or the socket
    /// has already closed.
    pub fn send(&self, message: ClientMessage) -> Result<()> {
        let tx = self.outbox().clone();
        match tx {
            Some(tx) => tx
                .send(message)
                .map_err(|_| anyhow::anyhow!("Connection closed")),
            None => Err(anyhow::anyhow!("Not connected")),
        }
    }

    pub fn disconnect(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        if self.outbox().take().is_some() {
            tracing::info!("Closing session socket");
        }
        self.state.set(ConnectionState::Disconnected);
    }
}

async fn run_connection(
    url: Url,
    mut outbox: mpsc::UnboundedReceiver<ClientMessage>,
    events: EventBus,
    state: SharedConnectionState,
    generation: Arc<AtomicU64>,
    id: u64,
) {
    let is_current = || generation.load(Ordering::SeqCst) == id;

    let ws_stream = match connect_async(url.as_str()).await {
        Ok((ws_stream, _)) => ws_stream,
        Err(e) => {
            tracing::error!("Failed to connect to {}: {}", url, e);
            if is_current() {
                state.set(ConnectionState::Failed);
            }
            return;
        }
    };

    if !is_current() {
        tracing::debug!("Socket superseded while connecting, dropping it");
        return;
    }
    tracing::info!("Connected to session socket at {}", url);
    state.set(ConnectionState::Connected);

    let (mut write, mut read) = ws_stream.split();

    let mut write_handle = tokio::spawn(async move {
        while let Some(msg) = outbox.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(j) => j,
                Err(e) => {
                    tracing::error!("Failed to serialize WebSocket message: {}", e);
                    continue;
                }
            };
            tracing::debug!(session_id = msg.session_id(), "Sending {}", json);
            if let Err(e) = write.send(Message::Text(json)).await {
                tracing::error!("Failed to send message: {}", e);
                return;
            }
        }
        // Outbox dropped: disconnect was requested
        if let Err(e) = write.close().await {
            tracing::debug!("Error while closing socket: {}", e);
        }
    });

    let mut read_handle = tokio::spawn(async move {
        while let Some(frame) = read.next().await {
            match frame {
                Ok(Message::Text(text)) => match ServerMessage::from_json(&text) {
                    Ok(msg) => events.dispatch(&msg),
                    Err(e) => tracing::warn!("Failed to parse server message: {}", e),
                },
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed connection");
                    break;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            }
        }
    });

    tokio::select! {
        _ = &mut read_handle => {
            tracing::debug!("Read task completed");
            write_handle.abort();
        }
        _ = &mut write_handle => {
            tracing::debug!("Write task completed");
            read_handle.abort();
        }
    }

    if is_current() {
        state.set(ConnectionState::Disconnected);
    }
}
