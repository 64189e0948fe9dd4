//! One view per `SessionView` state.
//!
//! Views only render props and report user intent; the session route feeds
//! that intent into the `SessionMachine`.

mod battle;
mod join;
mod lobby;
mod prompt;
mod results;
mod waiting;

pub use battle::BattleView;
pub use join::JoinView;
pub use lobby::{LobbyView, ParticipantList};
pub use prompt::PromptView;
pub use results::ResultsView;
pub use waiting::WaitingView;
