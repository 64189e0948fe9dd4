pub mod http_client;
pub mod messaging;
pub mod platform;
pub mod websocket;

// Re-export messaging types
pub use messaging::{EventBus, SharedConnectionState};
