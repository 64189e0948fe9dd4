//! Nano Tournament domain types.
//!
//! Everything here is pure data plus validation. The player crate builds its
//! view-state machine on top of these types; nothing in this crate performs I/O.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{BattleResults, Participant, Roster};
pub use error::DomainError;
pub use ids::{SessionId, UserId};
pub use value_objects::{CharacterPrompt, DisplayName, SessionCode};
