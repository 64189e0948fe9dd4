//! Session participants and the roster shown in the lobby

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// A user that has joined a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub id: UserId,
    pub name: String,
    pub joined_at: DateTime<Utc>,
}

impl Participant {
    pub fn new(id: UserId, name: impl Into<String>, joined_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            joined_at,
        }
    }

    /// Participant known only by id (the backend often sends bare ids)
    pub fn from_id(id: UserId, joined_at: DateTime<Utc>) -> Self {
        let name = id.as_str().to_string();
        Self::new(id, name, joined_at)
    }
}

/// Participants in join order.
///
/// Ids are unique: every insert is an upsert keyed by [`Participant::id`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a participant.
    ///
    /// An existing entry keeps its position and original `joined_at`; only the
    /// name is refreshed. Returns `true` when a new participant was added.
    pub fn upsert(&mut self, participant: Participant) -> bool {
        match self.participants.iter_mut().find(|p| p.id == participant.id) {
            Some(existing) => {
                existing.name = participant.name;
                false
            }
            None => {
                self.participants.push(participant);
                true
            }
        }
    }

    /// Remove a participant, returning it if present
    pub fn remove(&mut self, id: &UserId) -> Option<Participant> {
        let index = self.participants.iter().position(|p| &p.id == id)?;
        Some(self.participants.remove(index))
    }

    /// Replace the whole roster, dropping duplicate ids (first occurrence wins)
    pub fn replace_all(&mut self, participants: impl IntoIterator<Item = Participant>) {
        self.participants.clear();
        for participant in participants {
            if !self.contains(&participant.id) {
                self.participants.push(participant);
            }
        }
    }

    pub fn contains(&self, id: &UserId) -> bool {
        self.participants.iter().any(|p| &p.id == id)
    }

    pub fn get(&self, id: &UserId) -> Option<&Participant> {
        self.participants.iter().find(|p| &p.id == id)
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }
}

impl FromIterator<Participant> for Roster {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        let mut roster = Roster::new();
        roster.replace_all(iter);
        roster
    }
}
