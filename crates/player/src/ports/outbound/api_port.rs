//! API Port - REST boundary to the game backend
//!
//! Object-safe so the composition root can hand an `Arc<dyn ApiPort>` to the
//! application services. Each method maps to one backend route.

use async_trait::async_trait;
use thiserror::Error;

use nanotour_shared::{
    BattleResultResponse, CreateSessionRequest, CreateUserRequest, GenerateCharacterRequest,
    HealthResponse, JoinSessionRequest, SessionResponse, StartRoundResponse, UpdateSessionRequest,
    UserResponse,
};

/// REST failure as seen by the application layer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused, timeout)
    #[error("Request failed: {0}")]
    Transport(String),

    /// Non-2xx response; `detail` is the backend's error text
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Raw image returned by `POST /generate/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub content_type: String,
}

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ApiPort: Send + Sync {
    /// `POST /users/`
    async fn create_user(&self, request: CreateUserRequest) -> Result<UserResponse, ApiError>;

    /// `POST /session/`
    async fn create_session(
        &self,
        request: CreateSessionRequest,
    ) -> Result<SessionResponse, ApiError>;

    /// `POST /session/join/{session_id}`
    async fn join_session(
        &self,
        session_id: String,
        request: JoinSessionRequest,
    ) -> Result<SessionResponse, ApiError>;

    /// `PUT /session/{session_id}`
    async fn update_session(
        &self,
        session_id: String,
        request: UpdateSessionRequest,
    ) -> Result<SessionResponse, ApiError>;

    /// `GET /session/{session_id}`
    async fn get_session(&self, session_id: String) -> Result<SessionResponse, ApiError>;

    /// `POST /session/start-round/{session_id}`
    ///
    /// Registers both players in the backend's round and has it push
    /// `round_start` to them.
    async fn start_round(&self, session_id: String) -> Result<StartRoundResponse, ApiError>;

    /// `POST /generate/`
    async fn generate_character(
        &self,
        request: GenerateCharacterRequest,
    ) -> Result<GeneratedImage, ApiError>;

    /// `GET /session/result/{session_id}`
    async fn get_battle_result(
        &self,
        session_id: String,
    ) -> Result<BattleResultResponse, ApiError>;

    /// `GET /api/health`
    async fn health(&self) -> Result<HealthResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_detection() {
        let err = ApiError::Status {
            status: 404,
            detail: "Session not found".into(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "HTTP 404: Session not found");
        assert!(!ApiError::Transport("refused".into()).is_not_found());
    }
}
