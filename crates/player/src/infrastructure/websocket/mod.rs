//! WebSocket client for the session event stream
//!
//! - `client`: tokio-tungstenite transport with a queued outbox
//! - `adapter`: `GameConnectionPort` over the client
//! - `shared`: URL construction

mod adapter;
mod client;
mod shared;

pub use adapter::DesktopGameConnection;
pub use client::SessionSocketClient;
pub use shared::session_socket_url;
