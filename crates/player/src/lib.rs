//! Nano Tournament player.
//!
//! Desktop client for the battle game: UI, the session view-state machine,
//! and adapters for the backend's REST and WebSocket APIs.

pub mod application;
pub mod config;
pub mod infrastructure;
pub mod ports;
pub mod ui;

pub use config::{PlayerConfig, SessionTimings};
pub use ui::presentation::{use_services, UiServices};
pub use ui::{app, Route};
