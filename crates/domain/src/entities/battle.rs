//! Battle outcome as narrated by the backend judge

use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Outcome of a resolved battle.
///
/// Received once per session and never mutated; the script and summary are
/// rendered exactly as the backend sent them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResults {
    pub winner_user_id: UserId,
    pub battle_script: String,
    pub battle_summary: String,
}

impl BattleResults {
    pub fn new(
        winner_user_id: UserId,
        battle_script: impl Into<String>,
        battle_summary: impl Into<String>,
    ) -> Self {
        Self {
            winner_user_id,
            battle_script: battle_script.into(),
            battle_summary: battle_summary.into(),
        }
    }

    /// Whether `user_id` won this battle
    pub fn is_winner(&self, user_id: &UserId) -> bool {
        &self.winner_user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn winner_check() {
        let results = BattleResults::new(UserId::new("alice").unwrap(), "script", "summary");
        assert!(results.is_winner(&UserId::new("alice").unwrap()));
        assert!(!results.is_winner(&UserId::new("bob").unwrap()));
    }
}
