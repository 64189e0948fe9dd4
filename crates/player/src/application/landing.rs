//! Landing screen logic: join-code entry and session creation

use std::sync::Arc;

use nanotour_domain::{SessionCode, SessionId};
use nanotour_shared::CreateSessionRequest;

use crate::ports::outbound::{storage_keys, ApiPort, PlatformPort};

use super::fallback::Resolved;

/// Router path of the session screen for `session_id`
pub fn battle_path(session_id: &SessionId) -> String {
    format!("/battle/{}", session_id)
}

/// State of the join-by-code field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinCodeForm {
    code: String,
}

impl JoinCodeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the input, keeping only what a code can contain
    pub fn set_input(&mut self, raw: &str) {
        self.code = SessionCode::normalize_partial(raw);
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn can_submit(&self) -> bool {
        SessionCode::parse(&self.code).is_ok()
    }

    /// The code to navigate to, once complete
    pub fn submit(&self) -> Option<SessionCode> {
        SessionCode::parse(&self.code).ok()
    }
}

/// Backend calls made from the landing screen
#[derive(Clone)]
pub struct LandingService {
    api: Arc<dyn ApiPort>,
    platform: Arc<dyn PlatformPort>,
}

impl LandingService {
    pub fn new(api: Arc<dyn ApiPort>, platform: Arc<dyn PlatformPort>) -> Self {
        Self { api, platform }
    }

    /// Allocate a new session under the stable anonymous user id.
    ///
    /// The backend makes that id player1, so the id is remembered with the
    /// session for the join step to reuse. Falls back to a locally generated code when the backend is unavailable;
    /// the join step later claims it.
    pub async fn create_session(&self) -> Resolved<SessionId> {
        let user_id = self.platform.get_user_id();
        match self
            .api
            .create_session(CreateSessionRequest { user_id })
            .await
        {
            Ok(session) => match SessionId::new(session.session_id) {
                Ok(id) => {
                    tracing::info!(session_id = %id, "Created session");
                    self.platform
                        .storage_save(storage_keys::HOSTED_SESSION, id.as_str());
                    return Resolved::succeeded(id);
                }
                Err(e) => tracing::warn!("Backend returned an unusable session id: {}", e),
            },
            Err(e) => tracing::warn!("Failed to create session, using a local code: {}", e),
        }

        let code = SessionCode::generate(|upper| self.platform.random_index(upper));
        Resolved::fell_back(SessionId::from(code))
    }

    /// Whether the backend answers its health check
    pub async fn backend_available(&self) -> bool {
        match self.api.health().await {
            Ok(health) => {
                tracing::info!("Backend health: {}", health.status);
                true
            }
            Err(e) => {
                tracing::warn!("Backend unreachable, local fallbacks will be used: {}", e);
                false
            }
        }
    }
}
