//! Application services
//!
//! Services sit between the UI and the outbound ports. They never hold UI
//! state; the session screen keeps that in its `SessionMachine`.

pub mod session_service;

pub use session_service::{EventSubscription, SessionService};
