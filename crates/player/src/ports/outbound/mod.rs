//! Outbound ports - Interfaces for external services
//!
//! These ports define the contracts that infrastructure adapters must implement,
//! allowing application services to interact with the backend and the host
//! platform without depending on concrete implementations.

pub mod api_port;
pub mod game_connection_port;
pub mod platform_port;
pub mod testing;

pub use api_port::{ApiError, ApiPort, GeneratedImage};
pub use game_connection_port::{
    ConnectionState, GameConnectionPort, ServerEventHandler, SubscriptionId,
};
pub use platform_port::{storage_keys, PlatformPort};

#[cfg(any(test, feature = "testing"))]
pub use api_port::MockApiPort;
