//! Application layer: landing logic, the session view-state machine and the
//! service that runs its side effects against the ports.

pub mod character_image;
pub mod fallback;
pub mod landing;
pub mod services;
pub mod session_machine;

pub use character_image::CharacterImage;
pub use fallback::{CallOutcome, Resolved};
pub use landing::{battle_path, JoinCodeForm, LandingService};
pub use services::{EventSubscription, SessionService};
pub use session_machine::{
    JoinedSession, SessionEffect, SessionInput, SessionMachine, SessionView, TimerKind,
    TimerToken,
};
