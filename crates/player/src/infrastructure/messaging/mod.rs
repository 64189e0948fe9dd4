//! Inbound event fan-out and connection state shared by the socket tasks.
//!
//! - `EventBus`: per-kind subscriptions for server events
//! - `SharedConnectionState`: atomic connection state readable from any thread

pub mod connection;
pub mod event_bus;

pub use connection::SharedConnectionState;
pub use event_bus::EventBus;
