//! REST response bodies returned by the backend

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// `POST /users/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user_id: String,
    pub created_at: NaiveDateTime,
}

/// `POST /session/`, `POST /session/join/{id}`, `PUT /session/{id}`, `GET /session/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub player1_id: String,
    #[serde(default)]
    pub player2_id: Option<String>,
    pub created_at: NaiveDateTime,
    pub status: String,
    /// Arena condition rolled for the session, shown on the prompt screen
    #[serde(default)]
    pub condition: Option<String>,
}

impl SessionResponse {
    /// Player ids present in the session, host first
    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.player1_id.as_str()).chain(self.player2_id.as_deref())
    }
}

/// `POST /session/start-round/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartRoundResponse {
    pub message: String,
    pub session_id: String,
}

/// `GET /session/result/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResultResponse {
    pub session_id: String,
    pub winner_user_id: String,
    pub battle_script: String,
    pub battle_summary: String,
    pub completed_at: NaiveDateTime,
}

/// `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Error body for non-2xx responses.
///
/// `detail` is usually a string but validation failures send a list of
/// objects, so it is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    /// Human-readable detail text
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_response_accepts_naive_timestamps() {
        let json = r#"{
            "session_id": "9f1c",
            "player1_id": "alice",
            "player2_id": null,
            "created_at": "2025-06-15T10:30:00.123456",
            "status": "waiting",
            "condition": "Underwater volcano"
        }"#;
        let session: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(session.status, "waiting");
        assert_eq!(session.player_ids().collect::<Vec<_>>(), vec!["alice"]);
        assert_eq!(session.condition.as_deref(), Some("Underwater volcano"));
    }

    #[test]
    fn player_ids_include_second_player() {
        let json = r#"{
            "session_id": "9f1c",
            "player1_id": "alice",
            "player2_id": "bob",
            "created_at": "2025-06-15T10:30:00",
            "status": "active"
        }"#;
        let session: SessionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(session.player_ids().collect::<Vec<_>>(), vec!["alice", "bob"]);
        assert!(session.condition.is_none());
    }

    #[test]
    fn error_detail_string_and_list() {
        let plain: ErrorResponse =
            serde_json::from_str(r#"{"detail":"Session not found"}"#).unwrap();
        assert_eq!(plain.message(), "Session not found");

        let list: ErrorResponse =
            serde_json::from_str(r#"{"detail":[{"msg":"field required"}]}"#).unwrap();
        assert!(list.message().contains("field required"));
    }
}
