//! Session Service - runs `SessionEffect`s against the ports
//!
//! Each effect that has a result comes back as the next `SessionInput`.
//! Backend failures never surface to the caller: they are logged and replaced
//! by a fallback value.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use nanotour_domain::{
    BattleResults, CharacterPrompt, DisplayName, Participant, SessionId, UserId,
};
use nanotour_shared::{
    CreateUserRequest, EventKind, GenerateCharacterRequest, JoinSessionRequest, ServerMessage,
    SessionResponse, UpdateSessionRequest,
};

use crate::application::character_image::CharacterImage;
use crate::application::fallback::{mock_challenger, Resolved};
use crate::application::session_machine::{JoinedSession, SessionEffect, SessionInput};
use crate::ports::outbound::{
    storage_keys, ApiError, ApiPort, GameConnectionPort, PlatformPort, ServerEventHandler,
    SubscriptionId,
};

/// Handlers registered by [`SessionService::subscribe_events`].
///
/// Dropping the subscription removes them from the connection.
pub struct EventSubscription {
    connection: Arc<dyn GameConnectionPort>,
    ids: Vec<(EventKind, SubscriptionId)>,
}

impl EventSubscription {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        for (kind, id) in self.ids.drain(..) {
            self.connection.off(kind, id);
        }
    }
}

/// Executes session effects with the fallback policy applied
#[derive(Clone)]
pub struct SessionService {
    api: Arc<dyn ApiPort>,
    connection: Arc<dyn GameConnectionPort>,
    platform: Arc<dyn PlatformPort>,
}

impl SessionService {
    pub fn new(
        api: Arc<dyn ApiPort>,
        connection: Arc<dyn GameConnectionPort>,
        platform: Arc<dyn PlatformPort>,
    ) -> Self {
        Self {
            api,
            connection,
            platform,
        }
    }

    /// Forward every session event kind to `sink`
    pub fn subscribe_events(
        &self,
        sink: impl Fn(ServerMessage) + Send + Sync + 'static,
    ) -> EventSubscription {
        let sink = Arc::new(sink);
        let ids = EventKind::ALL
            .iter()
            .map(|&kind| {
                let sink = Arc::clone(&sink);
                let handler: ServerEventHandler =
                    Arc::new(move |message: &ServerMessage| sink(message.clone()));
                (kind, self.connection.on(kind, handler))
            })
            .collect();

        EventSubscription {
            connection: Arc::clone(&self.connection),
            ids,
        }
    }

    /// Run one effect. Returns the input it produces, if any.
    ///
    /// `NavigateHome` belongs to the UI and is a no-op here.
    pub async fn execute(&self, effect: SessionEffect) -> Option<SessionInput> {
        match effect {
            SessionEffect::RegisterAndJoin {
                session_id,
                user_id,
                name,
            } => Some(SessionInput::JoinResolved(
                self.register_and_join(&session_id, &user_id, &name).await,
            )),
            SessionEffect::ConnectSocket { user_id } => {
                if let Err(e) = self.connection.connect(&user_id) {
                    tracing::warn!("Could not open session socket: {:#}", e);
                }
                None
            }
            SessionEffect::JoinSocketSession { session_id } => {
                log_send_failure(self.connection.join_session(&session_id));
                None
            }
            SessionEffect::StartRound { session_id } => {
                log_send_failure(self.connection.start_round(&session_id));
                self.start_round(&session_id).await;
                None
            }
            SessionEffect::CharacterReady { session_id } => {
                log_send_failure(self.connection.character_ready(&session_id));
                None
            }
            SessionEffect::GenerateCharacter {
                session_id,
                user_id,
                prompt,
            } => Some(SessionInput::CharacterResolved(
                self.generate_character(&session_id, &user_id, &prompt)
                    .await,
            )),
            SessionEffect::StartTimer { token, delay } => {
                let ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
                self.platform.sleep_ms(ms).await;
                Some(SessionInput::TimerElapsed(token))
            }
            SessionEffect::FetchResults { session_id } => self
                .fetch_results(&session_id)
                .await
                .map(SessionInput::ResultsFetched),
            SessionEffect::Disconnect => {
                self.connection.disconnect();
                None
            }
            SessionEffect::NavigateHome => None,
        }
    }

    async fn register_and_join(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        name: &DisplayName,
    ) -> Resolved<JoinedSession> {
        self.platform
            .storage_save(storage_keys::DISPLAY_NAME, name.as_str());

        // The backend rejects names it has seen before; joining still works
        if let Err(e) = self
            .api
            .create_user(CreateUserRequest {
                name: name.to_string(),
            })
            .await
        {
            tracing::debug!("User registration skipped: {}", e);
        }

        // The backend made the creator player1 under its anonymous id
        let join_as = self
            .hosted_session_member(session_id)
            .unwrap_or_else(|| user_id.clone());

        let joined = match self
            .api
            .join_session(
                session_id.to_string(),
                JoinSessionRequest {
                    user_id: join_as.to_string(),
                },
            )
            .await
        {
            Err(e) if e.is_not_found() => {
                tracing::info!(session_id = %session_id, "Session unknown to backend, claiming it");
                self.api
                    .update_session(
                        session_id.to_string(),
                        UpdateSessionRequest {
                            user_id: join_as.to_string(),
                            status: None,
                        },
                    )
                    .await
            }
            Err(e) if e.status() == Some(400) => {
                self.existing_membership(session_id, &join_as, e).await
            }
            other => other,
        };

        let now = self.platform.now();
        match joined {
            Ok(session) => Resolved::succeeded(JoinedSession {
                participants: participants_from(&session, now),
                condition: session.condition,
                member_id: Some(join_as),
            }),
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    "Failed to join session, continuing offline: {}",
                    e
                );
                Resolved::fell_back(JoinedSession {
                    participants: mock_challenger(now).into_iter().collect(),
                    ..JoinedSession::default()
                })
            }
        }
    }

    /// Anonymous id this client created `session_id` under, if it did
    fn hosted_session_member(&self, session_id: &SessionId) -> Option<UserId> {
        let hosted = self.platform.storage_load(storage_keys::HOSTED_SESSION)?;
        if hosted != session_id.as_str() {
            return None;
        }
        UserId::new(self.platform.get_user_id()).ok()
    }

    /// A rejected join is fine when the backend already lists `member`
    /// (our own session, or a rejoin). Any other rejection stands.
    async fn existing_membership(
        &self,
        session_id: &SessionId,
        member: &UserId,
        rejection: ApiError,
    ) -> Result<SessionResponse, ApiError> {
        match self.api.get_session(session_id.to_string()).await {
            Ok(session) if session.player_ids().any(|id| id == member.as_str()) => {
                tracing::info!(session_id = %session_id, user_id = %member, "Already in session");
                Ok(session)
            }
            Ok(_) => Err(rejection),
            Err(e) => {
                tracing::debug!("Session lookup after rejected join failed: {}", e);
                Err(rejection)
            }
        }
    }

    async fn start_round(&self, session_id: &SessionId) {
        match self.api.start_round(session_id.to_string()).await {
            Ok(response) => {
                tracing::info!(session_id = %session_id, "{}", response.message);
            }
            Err(e) => {
                tracing::warn!(session_id = %session_id, "Failed to start round: {}", e);
            }
        }
    }

    async fn generate_character(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        prompt: &CharacterPrompt,
    ) -> Resolved<CharacterImage> {
        let request = GenerateCharacterRequest {
            prompt: prompt.to_string(),
            session_id: session_id.to_string(),
            user_id: user_id.to_string(),
        };
        match self.api.generate_character(request).await {
            Ok(image) => {
                tracing::info!(
                    "Generated character image ({} bytes, {})",
                    image.bytes.len(),
                    image.content_type
                );
                Resolved::succeeded(CharacterImage::from(image))
            }
            Err(e) => {
                tracing::warn!("Character generation failed, using placeholder: {}", e);
                Resolved::fell_back(CharacterImage::Placeholder)
            }
        }
    }

    async fn fetch_results(&self, session_id: &SessionId) -> Option<BattleResults> {
        let response = match self.api.get_battle_result(session_id.to_string()).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(session_id = %session_id, "No battle results yet: {}", e);
                return None;
            }
        };
        match UserId::new(response.winner_user_id) {
            Ok(winner) => Some(BattleResults::new(
                winner,
                response.battle_script,
                response.battle_summary,
            )),
            Err(e) => {
                tracing::warn!("Battle result without a winner: {}", e);
                None
            }
        }
    }
}

fn log_send_failure(result: anyhow::Result<()>) {
    if let Err(e) = result {
        tracing::warn!("{:#}", e);
    }
}

fn participants_from(session: &SessionResponse, now: DateTime<Utc>) -> Vec<Participant> {
    session
        .player_ids()
        .filter_map(|id| UserId::new(id).ok())
        .map(|id| Participant::from_id(id, now))
        .collect()
}
