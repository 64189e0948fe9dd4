//! Session-scoped entities held in client memory

mod battle;
mod participant;

pub use battle::BattleResults;
pub use participant::{Participant, Roster};
