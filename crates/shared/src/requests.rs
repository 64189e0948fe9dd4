//! REST request bodies
//!
//! Field names match the backend's JSON schema exactly.

use serde::{Deserialize, Serialize};

/// `POST /users/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

/// `POST /session/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: String,
}

/// `POST /session/join/{session_id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinSessionRequest {
    pub user_id: String,
}

/// `PUT /session/{session_id}`
///
/// Claims a session id the backend does not know yet (a locally generated
/// code) for `user_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSessionRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `POST /generate/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCharacterRequest {
    pub prompt: String,
    pub session_id: String,
    pub user_id: String,
}
