//! Succeeded-or-fell-back results
//!
//! Every backend call the session screen makes has a local fallback. The
//! reducer only needs to know which one it got, so views can flag offline play.

use chrono::{DateTime, Utc};

use nanotour_domain::{Participant, UserId};

pub const MOCK_CHALLENGER_ID: &str = "mock-rival";
pub const MOCK_CHALLENGER_NAME: &str = "Mystery Challenger";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    Succeeded,
    FellBack,
}

/// A value plus whether it came from the backend or from a local fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub outcome: CallOutcome,
}

impl<T> Resolved<T> {
    pub fn succeeded(value: T) -> Self {
        Self {
            value,
            outcome: CallOutcome::Succeeded,
        }
    }

    pub fn fell_back(value: T) -> Self {
        Self {
            value,
            outcome: CallOutcome::FellBack,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.outcome == CallOutcome::FellBack
    }
}

/// Opponent shown in the lobby when the backend could not be reached
pub fn mock_challenger(now: DateTime<Utc>) -> Option<Participant> {
    UserId::new(MOCK_CHALLENGER_ID)
        .ok()
        .map(|id| Participant::new(id, MOCK_CHALLENGER_NAME, now))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_flags() {
        assert!(!Resolved::succeeded(1).is_fallback());
        assert!(Resolved::fell_back(1).is_fallback());
    }

    #[test]
    fn mock_challenger_has_stable_identity() {
        let now = Utc::now();
        let rival = mock_challenger(now).unwrap();
        assert_eq!(rival.id.as_str(), MOCK_CHALLENGER_ID);
        assert_eq!(rival.name, MOCK_CHALLENGER_NAME);
        assert_eq!(rival.joined_at, now);
    }
}
