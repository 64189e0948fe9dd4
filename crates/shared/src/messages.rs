//! WebSocket message types for backend-player communication
//!
//! ## Versioning Policy
//!
//! - New variants can be added at the end (forward compatible)
//! - Renaming variants is a breaking change
//! - Unknown message types deserialize to `Unknown` for forward compatibility
//! - Extra fields (the backend stamps every message with `timestamp`) are ignored

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Client Messages (Player → Backend)
// =============================================================================

/// Messages from the player to the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe this socket to a session's broadcasts
    JoinSession { session_id: String },
    /// Ask the backend to start the round for everyone in the session
    StartRound { session_id: String },
    /// Our character has been generated
    CharacterReady { session_id: String },
}

impl ClientMessage {
    pub fn session_id(&self) -> &str {
        match self {
            Self::JoinSession { session_id }
            | Self::StartRound { session_id }
            | Self::CharacterReady { session_id } => session_id,
        }
    }
}

// =============================================================================
// Server Messages (Backend → Player)
// =============================================================================

/// A roster entry in `session_participants`.
///
/// The backend sends either bare user ids or objects with a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParticipantEntry {
    Id(String),
    Detailed {
        user_id: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl ParticipantEntry {
    pub fn user_id(&self) -> &str {
        match self {
            Self::Id(id) => id,
            Self::Detailed { user_id, .. } => user_id,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Detailed { name, .. } => name.as_deref(),
        }
    }
}

/// Messages pushed from the backend to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A new round has begun; `condition` describes the arena
    RoundStart {
        #[serde(default)]
        session_id: Option<String>,
        #[serde(default)]
        condition: Option<String>,
    },
    /// Every player in the session has a character
    AllCharactersReady {
        #[serde(default)]
        session_id: Option<String>,
    },
    /// The judge has started resolving the battle
    BattleStart {
        #[serde(default)]
        session_id: Option<String>,
    },
    /// Battle outcome
    Results {
        #[serde(default)]
        session_id: Option<String>,
        winner_user_id: String,
        battle_script: String,
        battle_summary: String,
    },
    UserJoinedSession {
        #[serde(default)]
        session_id: Option<String>,
        user_id: String,
        #[serde(default)]
        name: Option<String>,
    },
    UserLeftSession {
        #[serde(default)]
        session_id: Option<String>,
        user_id: String,
    },
    /// Full roster snapshot
    SessionParticipants {
        #[serde(default)]
        session_id: Option<String>,
        #[serde(default)]
        participants: Vec<ParticipantEntry>,
    },
    Error {
        #[serde(default)]
        message: String,
    },
    /// Unknown message type for forward compatibility
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    /// Decode a text frame
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Event kind used for subscriptions; `None` for unknown messages
    pub fn kind(&self) -> Option<EventKind> {
        Some(match self {
            Self::RoundStart { .. } => EventKind::RoundStart,
            Self::AllCharactersReady { .. } => EventKind::AllCharactersReady,
            Self::BattleStart { .. } => EventKind::BattleStart,
            Self::Results { .. } => EventKind::Results,
            Self::UserJoinedSession { .. } => EventKind::UserJoinedSession,
            Self::UserLeftSession { .. } => EventKind::UserLeftSession,
            Self::SessionParticipants { .. } => EventKind::SessionParticipants,
            Self::Error { .. } => EventKind::Error,
            Self::Unknown => return None,
        })
    }

    /// Session the message is scoped to, if the backend said so
    pub fn session_id(&self) -> Option<&str> {
        match self {
            Self::RoundStart { session_id, .. }
            | Self::AllCharactersReady { session_id }
            | Self::BattleStart { session_id }
            | Self::Results { session_id, .. }
            | Self::UserJoinedSession { session_id, .. }
            | Self::UserLeftSession { session_id, .. }
            | Self::SessionParticipants { session_id, .. } => session_id.as_deref(),
            Self::Error { .. } | Self::Unknown => None,
        }
    }
}

/// Server event names a subscriber can listen for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    RoundStart,
    AllCharactersReady,
    BattleStart,
    Results,
    UserJoinedSession,
    UserLeftSession,
    SessionParticipants,
    Error,
}

impl EventKind {
    pub const ALL: [EventKind; 8] = [
        EventKind::RoundStart,
        EventKind::AllCharactersReady,
        EventKind::BattleStart,
        EventKind::Results,
        EventKind::UserJoinedSession,
        EventKind::UserLeftSession,
        EventKind::SessionParticipants,
        EventKind::Error,
    ];

    /// Wire name, matching the `type` tag
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::RoundStart => "round_start",
            EventKind::AllCharactersReady => "all_characters_ready",
            EventKind::BattleStart => "battle_start",
            EventKind::Results => "results",
            EventKind::UserJoinedSession => "user_joined_session",
            EventKind::UserLeftSession => "user_left_session",
            EventKind::SessionParticipants => "session_participants",
            EventKind::Error => "error",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
