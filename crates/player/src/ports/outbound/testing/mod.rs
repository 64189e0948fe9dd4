//! Test utilities for outbound ports
//!
//! Hand-written doubles for the ports that `mockall` is awkward for: the
//! connection port (stores handlers and lets tests push events) and the
//! platform port (instant sleep, fixed clock, in-memory storage).
//! `MockApiPort` is generated by `mockall::automock` in `api_port`.
//!
//! These are available in unit tests and behind the `testing` feature.

#[cfg(any(test, feature = "testing"))]
mod mock_game_connection;
#[cfg(any(test, feature = "testing"))]
mod mock_platform;

#[cfg(any(test, feature = "testing"))]
pub use mock_game_connection::{MockGameConnection, SentSignal};
#[cfg(any(test, feature = "testing"))]
pub use mock_platform::MockPlatform;
