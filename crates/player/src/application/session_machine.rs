//! Session screen view-state machine
//!
//! `SessionMachine::apply` is a pure reducer: it updates the machine and
//! returns the side effects the caller has to run. Effects that produce a
//! result (REST calls, timers) are fed back in as a new [`SessionInput`].
//!
//! ```text
//! join -> lobby -> prompt -> waiting -> battle -> results
//! ```
//!
//! Every view change bumps the timer epoch, which invalidates timers started
//! in the previous view.

use std::time::Duration;

use chrono::{DateTime, Utc};

use nanotour_domain::{
    BattleResults, CharacterPrompt, DisplayName, Participant, Roster, SessionId, UserId,
};
use nanotour_shared::{ParticipantEntry, ServerMessage};

use crate::config::SessionTimings;

use super::character_image::CharacterImage;
use super::fallback::{CallOutcome, Resolved};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionView {
    Join,
    Lobby,
    Prompt,
    Waiting,
    Battle,
    Results,
}

impl SessionView {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionView::Join => "join",
            SessionView::Lobby => "lobby",
            SessionView::Prompt => "prompt",
            SessionView::Waiting => "waiting",
            SessionView::Battle => "battle",
            SessionView::Results => "results",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Lobby to prompt
    LobbyCountdown,
    /// Waiting to battle when the server never says everyone is ready
    WaitingFallback,
    /// Fetch results over REST when the `results` push never arrives
    BattleFallback,
}

/// Identifies one started timer; stale once the epoch moves on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken {
    pub kind: TimerKind,
    pub epoch: u64,
}

/// Roster returned by the join call (or the offline fallback)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinedSession {
    pub participants: Vec<Participant>,
    /// Arena condition the backend rolled when the session was created
    pub condition: Option<String>,
    /// Id the backend knows this player by, when it differs from the
    /// display name (the host created the session under its anonymous id)
    pub member_id: Option<UserId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionInput {
    NameSubmitted(String),
    JoinResolved(Resolved<JoinedSession>),
    PromptSubmitted(String),
    CharacterResolved(Resolved<CharacterImage>),
    TimerElapsed(TimerToken),
    Server(ServerMessage),
    ResultsFetched(BattleResults),
    Restart,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    RegisterAndJoin {
        session_id: SessionId,
        user_id: UserId,
        name: DisplayName,
    },
    ConnectSocket {
        user_id: UserId,
    },
    JoinSocketSession {
        session_id: SessionId,
    },
    StartRound {
        session_id: SessionId,
    },
    GenerateCharacter {
        session_id: SessionId,
        user_id: UserId,
        prompt: CharacterPrompt,
    },
    CharacterReady {
        session_id: SessionId,
    },
    StartTimer {
        token: TimerToken,
        delay: Duration,
    },
    FetchResults {
        session_id: SessionId,
    },
    Disconnect,
    NavigateHome,
}

/// Client-side state of one session screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionMachine {
    session_id: SessionId,
    timings: SessionTimings,
    view: SessionView,
    epoch: u64,

    user_id: Option<UserId>,
    display_name: Option<DisplayName>,
    roster: Roster,

    name_error: Option<String>,
    prompt_error: Option<String>,
    join_in_flight: bool,
    generation_in_flight: bool,

    condition: Option<String>,
    character: Option<CharacterImage>,
    results: Option<BattleResults>,
    last_server_error: Option<String>,
    offline: bool,
}

impl SessionMachine {
    pub fn new(session_id: SessionId, timings: SessionTimings) -> Self {
        Self {
            session_id,
            timings,
            view: SessionView::Join,
            epoch: 0,
            user_id: None,
            display_name: None,
            roster: Roster::new(),
            name_error: None,
            prompt_error: None,
            join_in_flight: false,
            generation_in_flight: false,
            condition: None,
            character: None,
            results: None,
            last_server_error: None,
            offline: false,
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn view(&self) -> SessionView {
        self.view
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn display_name(&self) -> Option<&DisplayName> {
        self.display_name.as_ref()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn name_error(&self) -> Option<&str> {
        self.name_error.as_deref()
    }

    pub fn prompt_error(&self) -> Option<&str> {
        self.prompt_error.as_deref()
    }

    pub fn is_joining(&self) -> bool {
        self.join_in_flight
    }

    pub fn is_generating(&self) -> bool {
        self.generation_in_flight
    }

    /// Arena condition announced with the round, if any
    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    pub fn character(&self) -> Option<&CharacterImage> {
        self.character.as_ref()
    }

    pub fn results(&self) -> Option<&BattleResults> {
        self.results.as_ref()
    }

    pub fn last_server_error(&self) -> Option<&str> {
        self.last_server_error.as_deref()
    }

    /// Whether any call so far fell back to local data
    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// `Some(true)` when results are in and the local player won
    pub fn local_player_won(&self) -> Option<bool> {
        let results = self.results.as_ref()?;
        Some(
            self.user_id
                .as_ref()
                .is_some_and(|id| results.is_winner(id)),
        )
    }

    // -------------------------------------------------------------------------
    // Reducer
    // -------------------------------------------------------------------------

    /// Apply one input and return the effects to run, in order.
    pub fn apply(&mut self, input: SessionInput, now: DateTime<Utc>) -> Vec<SessionEffect> {
        match input {
            SessionInput::NameSubmitted(raw) => self.submit_name(raw),
            SessionInput::JoinResolved(resolved) => self.join_resolved(resolved, now),
            SessionInput::PromptSubmitted(raw) => self.submit_prompt(raw),
            SessionInput::CharacterResolved(resolved) => self.character_resolved(resolved),
            SessionInput::TimerElapsed(token) => self.timer_elapsed(token),
            SessionInput::Server(message) => self.server_event(message, now),
            SessionInput::ResultsFetched(results) => {
                if self.view != SessionView::Battle {
                    return self.ignored("fetched results");
                }
                self.show_results(results);
                Vec::new()
            }
            SessionInput::Restart => {
                if self.view != SessionView::Results {
                    return self.ignored("restart");
                }
                vec![SessionEffect::Disconnect, SessionEffect::NavigateHome]
            }
        }
    }

    fn ignored(&self, what: &str) -> Vec<SessionEffect> {
        tracing::debug!(
            session_id = %self.session_id,
            view = self.view.as_str(),
            "Ignoring {}",
            what
        );
        Vec::new()
    }

    fn transition(&mut self, view: SessionView) {
        tracing::info!(
            session_id = %self.session_id,
            "Session view {} -> {}",
            self.view.as_str(),
            view.as_str()
        );
        self.view = view;
        self.epoch += 1;
    }

    fn start_timer(&self, kind: TimerKind) -> SessionEffect {
        let delay = match kind {
            TimerKind::LobbyCountdown => self.timings.lobby_countdown,
            TimerKind::WaitingFallback => self.timings.waiting_fallback,
            TimerKind::BattleFallback => self.timings.battle_fallback,
        };
        SessionEffect::StartTimer {
            token: TimerToken {
                kind,
                epoch: self.epoch,
            },
            delay,
        }
    }

    fn submit_name(&mut self, raw: String) -> Vec<SessionEffect> {
        if self.view != SessionView::Join {
            return self.ignored("name submit");
        }
        if self.join_in_flight {
            return self.ignored("name submit while joining");
        }

        let validated = DisplayName::new(raw).and_then(|name| {
            let user_id = UserId::new(name.as_str())?;
            Ok((name, user_id))
        });
        let (name, user_id) = match validated {
            Ok(pair) => pair,
            Err(e) => {
                self.name_error = Some(e.message().to_string());
                return Vec::new();
            }
        };

        self.name_error = None;
        self.join_in_flight = true;
        self.user_id = Some(user_id.clone());
        self.display_name = Some(name.clone());

        vec![SessionEffect::RegisterAndJoin {
            session_id: self.session_id.clone(),
            user_id,
            name,
        }]
    }

    fn join_resolved(
        &mut self,
        resolved: Resolved<JoinedSession>,
        now: DateTime<Utc>,
    ) -> Vec<SessionEffect> {
        if self.view != SessionView::Join || !self.join_in_flight {
            return self.ignored("join result");
        }
        let (Some(name_id), Some(name)) = (self.user_id.clone(), self.display_name.clone()) else {
            return self.ignored("join result without a local user");
        };

        let joined = resolved.value;
        let user_id = joined.member_id.unwrap_or(name_id);
        self.user_id = Some(user_id.clone());
        if joined.condition.is_some() {
            self.condition = joined.condition;
        }

        self.join_in_flight = false;
        self.offline |= resolved.outcome == CallOutcome::FellBack;
        self.roster.replace_all(joined.participants);
        self.roster
            .upsert(Participant::new(user_id.clone(), name.as_str(), now));
        self.transition(SessionView::Lobby);

        vec![
            SessionEffect::ConnectSocket { user_id },
            SessionEffect::JoinSocketSession {
                session_id: self.session_id.clone(),
            },
            self.start_timer(TimerKind::LobbyCountdown),
        ]
    }

    fn submit_prompt(&mut self, raw: String) -> Vec<SessionEffect> {
        if self.view != SessionView::Prompt {
            return self.ignored("prompt submit");
        }
        if self.generation_in_flight {
            return self.ignored("prompt submit while generating");
        }
        let Some(user_id) = self.user_id.clone() else {
            return self.ignored("prompt submit without a local user");
        };

        let prompt = match CharacterPrompt::new(raw) {
            Ok(prompt) => prompt,
            Err(e) => {
                self.prompt_error = Some(e.message().to_string());
                return Vec::new();
            }
        };

        self.prompt_error = None;
        self.generation_in_flight = true;

        vec![SessionEffect::GenerateCharacter {
            session_id: self.session_id.clone(),
            user_id,
            prompt,
        }]
    }

    fn character_resolved(&mut self, resolved: Resolved<CharacterImage>) -> Vec<SessionEffect> {
        if self.view != SessionView::Prompt || !self.generation_in_flight {
            return self.ignored("character result");
        }

        self.generation_in_flight = false;
        self.offline |= resolved.is_fallback();
        self.character = Some(resolved.value);
        self.transition(SessionView::Waiting);

        vec![
            SessionEffect::CharacterReady {
                session_id: self.session_id.clone(),
            },
            self.start_timer(TimerKind::WaitingFallback),
        ]
    }

    fn timer_elapsed(&mut self, token: TimerToken) -> Vec<SessionEffect> {
        if token.epoch != self.epoch {
            return self.ignored("stale timer");
        }

        match (token.kind, self.view) {
            (TimerKind::LobbyCountdown, SessionView::Lobby) => {
                self.transition(SessionView::Prompt);
                vec![SessionEffect::StartRound {
                    session_id: self.session_id.clone(),
                }]
            }
            (TimerKind::WaitingFallback, SessionView::Waiting) => self.enter_battle(),
            (TimerKind::BattleFallback, SessionView::Battle) => {
                vec![SessionEffect::FetchResults {
                    session_id: self.session_id.clone(),
                }]
            }
            _ => self.ignored("timer for another view"),
        }
    }

    fn enter_battle(&mut self) -> Vec<SessionEffect> {
        self.transition(SessionView::Battle);
        vec![self.start_timer(TimerKind::BattleFallback)]
    }

    fn show_results(&mut self, results: BattleResults) {
        self.results = Some(results);
        if self.view != SessionView::Results {
            self.transition(SessionView::Results);
        }
    }

    fn server_event(&mut self, message: ServerMessage, now: DateTime<Utc>) -> Vec<SessionEffect> {
        if let Some(id) = message.session_id() {
            if id != self.session_id.as_str() {
                tracing::debug!(
                    session_id = %self.session_id,
                    "Ignoring event for session {}",
                    id
                );
                return Vec::new();
            }
        }

        match message {
            ServerMessage::RoundStart { condition, .. } => match self.view {
                SessionView::Lobby => {
                    if condition.is_some() {
                        self.condition = condition;
                    }
                    self.transition(SessionView::Prompt);
                    Vec::new()
                }
                // Our own start_round comes back to us after the countdown
                SessionView::Prompt => {
                    if condition.is_some() {
                        self.condition = condition;
                    }
                    Vec::new()
                }
                _ => self.ignored("round_start"),
            },
            ServerMessage::AllCharactersReady { .. } | ServerMessage::BattleStart { .. } => {
                if self.view != SessionView::Waiting {
                    return self.ignored("battle signal");
                }
                self.enter_battle()
            }
            ServerMessage::Results {
                winner_user_id,
                battle_script,
                battle_summary,
                ..
            } => {
                match UserId::new(winner_user_id) {
                    Ok(winner) => {
                        self.show_results(BattleResults::new(winner, battle_script, battle_summary))
                    }
                    Err(e) => tracing::warn!("Dropping results without a winner: {}", e),
                }
                Vec::new()
            }
            ServerMessage::UserJoinedSession { user_id, name, .. } => {
                if let Ok(id) = UserId::new(user_id) {
                    let name = name.filter(|n| !n.trim().is_empty());
                    match name {
                        Some(name) => {
                            self.roster.upsert(Participant::new(id, name, now));
                        }
                        None if !self.roster.contains(&id) => {
                            self.roster.upsert(Participant::from_id(id, now));
                        }
                        None => {}
                    }
                }
                Vec::new()
            }
            ServerMessage::UserLeftSession { user_id, .. } => {
                if let Ok(id) = UserId::new(user_id) {
                    self.roster.remove(&id);
                }
                Vec::new()
            }
            ServerMessage::SessionParticipants { participants, .. } => {
                let snapshot: Vec<Participant> = participants
                    .iter()
                    .filter_map(|entry| self.participant_from_entry(entry, now))
                    .collect();
                self.roster.replace_all(snapshot);
                Vec::new()
            }
            ServerMessage::Error { message } => {
                tracing::warn!(session_id = %self.session_id, "Server error: {}", message);
                self.last_server_error = Some(message);
                Vec::new()
            }
            ServerMessage::Unknown => Vec::new(),
        }
    }

    /// Roster entry from a snapshot, keeping the name and join time we already
    /// know when the backend only sends an id
    fn participant_from_entry(
        &self,
        entry: &ParticipantEntry,
        now: DateTime<Utc>,
    ) -> Option<Participant> {
        let id = UserId::new(entry.user_id()).ok()?;
        let known = self.roster.get(&id);
        let joined_at = known.map(|p| p.joined_at).unwrap_or(now);
        let name = entry
            .name()
            .filter(|n| !n.trim().is_empty())
            .map(str::to_string)
            .or_else(|| known.map(|p| p.name.clone()))
            .unwrap_or_else(|| id.as_str().to_string());
        Some(Participant::new(id, name, joined_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fallback::mock_challenger;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap()
    }

    fn sid() -> SessionId {
        SessionId::new("ABC123").unwrap()
    }

    fn uid(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn machine() -> SessionMachine {
        SessionMachine::new(sid(), SessionTimings::default())
    }

    fn server(machine: &mut SessionMachine, message: ServerMessage) -> Vec<SessionEffect> {
        machine.apply(SessionInput::Server(message), now())
    }

    fn timer_token(effects: &[SessionEffect]) -> TimerToken {
        effects
            .iter()
            .find_map(|effect| match effect {
                SessionEffect::StartTimer { token, .. } => Some(*token),
                _ => None,
            })
            .expect("a StartTimer effect")
    }

    /// Machine in the lobby as "Ada", returning the lobby countdown token
    fn in_lobby() -> (SessionMachine, TimerToken) {
        let mut m = machine();
        m.apply(SessionInput::NameSubmitted("Ada".into()), now());
        let effects = m.apply(
            SessionInput::JoinResolved(Resolved::succeeded(JoinedSession::default())),
            now(),
        );
        let token = timer_token(&effects);
        (m, token)
    }

    fn in_prompt() -> SessionMachine {
        let (mut m, token) = in_lobby();
        m.apply(SessionInput::TimerElapsed(token), now());
        m
    }

    /// Machine in the waiting view, returning the waiting fallback token
    fn in_waiting() -> (SessionMachine, TimerToken) {
        let mut m = in_prompt();
        m.apply(SessionInput::PromptSubmitted("A kraken".into()), now());
        let effects = m.apply(
            SessionInput::CharacterResolved(Resolved::succeeded(CharacterImage::Placeholder)),
            now(),
        );
        let token = timer_token(&effects);
        (m, token)
    }

    fn in_battle() -> (SessionMachine, TimerToken) {
        let (mut m, token) = in_waiting();
        let effects = m.apply(SessionInput::TimerElapsed(token), now());
        let token = timer_token(&effects);
        (m, token)
    }

    fn results_event(session_id: Option<&str>, summary: &str) -> ServerMessage {
        ServerMessage::Results {
            session_id: session_id.map(str::to_string),
            winner_user_id: "Ada".into(),
            battle_script: "Round one...".into(),
            battle_summary: summary.into(),
        }
    }

    // -------------------------------------------------------------------------
    // join
    // -------------------------------------------------------------------------

    #[test]
    fn valid_name_registers_and_joins() {
        let mut m = machine();
        let effects = m.apply(SessionInput::NameSubmitted("  Ada ".into()), now());

        assert_eq!(
            effects,
            vec![SessionEffect::RegisterAndJoin {
                session_id: sid(),
                user_id: uid("Ada"),
                name: DisplayName::new("Ada").unwrap(),
            }]
        );
        assert!(m.is_joining());
        assert_eq!(m.view(), SessionView::Join);
    }

    #[test]
    fn blank_name_sets_form_error() {
        let mut m = machine();
        let effects = m.apply(SessionInput::NameSubmitted("   ".into()), now());

        assert!(effects.is_empty());
        assert_eq!(m.name_error(), Some("Display name cannot be empty"));
        assert!(!m.is_joining());
    }

    #[test]
    fn second_submit_while_joining_is_ignored() {
        let mut m = machine();
        m.apply(SessionInput::NameSubmitted("Ada".into()), now());
        let effects = m.apply(SessionInput::NameSubmitted("Bob".into()), now());

        assert!(effects.is_empty());
        assert_eq!(m.user_id(), Some(&uid("Ada")));
    }

    #[test]
    fn join_moves_to_lobby_and_connects() {
        let mut m = machine();
        m.apply(SessionInput::NameSubmitted("Ada".into()), now());
        let joined = JoinedSession {
            participants: vec![Participant::from_id(uid("Bob"), now())],
            ..JoinedSession::default()
        };
        let effects = m.apply(
            SessionInput::JoinResolved(Resolved::succeeded(joined)),
            now(),
        );

        assert_eq!(m.view(), SessionView::Lobby);
        assert_eq!(
            effects,
            vec![
                SessionEffect::ConnectSocket { user_id: uid("Ada") },
                SessionEffect::JoinSocketSession { session_id: sid() },
                SessionEffect::StartTimer {
                    token: TimerToken {
                        kind: TimerKind::LobbyCountdown,
                        epoch: 1,
                    },
                    delay: SessionTimings::default().lobby_countdown,
                },
            ]
        );
        let ids: Vec<&str> = m.roster().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["Bob", "Ada"]);
        assert!(!m.is_offline());
    }

    #[test]
    fn join_fallback_shows_self_and_mock_rival() {
        let mut m = machine();
        m.apply(SessionInput::NameSubmitted("Ada".into()), now());
        let joined = JoinedSession {
            participants: mock_challenger(now()).into_iter().collect(),
            ..JoinedSession::default()
        };
        m.apply(
            SessionInput::JoinResolved(Resolved::fell_back(joined)),
            now(),
        );

        assert_eq!(m.view(), SessionView::Lobby);
        assert!(m.roster().contains(&uid("Ada")));
        assert_eq!(m.roster().len(), 2);
        assert!(m.is_offline());
    }

    #[test]
    fn join_keeps_condition_for_the_prompt() {
        let mut m = machine();
        m.apply(SessionInput::NameSubmitted("Ada".into()), now());
        let joined = JoinedSession {
            condition: Some("Underwater volcano".into()),
            ..JoinedSession::default()
        };
        let effects = m.apply(
            SessionInput::JoinResolved(Resolved::succeeded(joined)),
            now(),
        );
        m.apply(SessionInput::TimerElapsed(timer_token(&effects)), now());

        assert_eq!(m.view(), SessionView::Prompt);
        assert_eq!(m.condition(), Some("Underwater volcano"));

        // A round_start without a condition keeps the known one
        server(
            &mut m,
            ServerMessage::RoundStart {
                session_id: Some("ABC123".into()),
                condition: None,
            },
        );
        assert_eq!(m.condition(), Some("Underwater volcano"));
    }

    #[test]
    fn host_plays_under_the_id_that_created_the_session() {
        let mut m = machine();
        m.apply(SessionInput::NameSubmitted("Ada".into()), now());
        let joined = JoinedSession {
            participants: vec![Participant::from_id(uid("guest-1"), now())],
            member_id: Some(uid("guest-1")),
            ..JoinedSession::default()
        };
        let effects = m.apply(
            SessionInput::JoinResolved(Resolved::succeeded(joined)),
            now(),
        );

        assert_eq!(m.user_id(), Some(&uid("guest-1")));
        assert_eq!(
            effects[0],
            SessionEffect::ConnectSocket {
                user_id: uid("guest-1")
            }
        );
        assert_eq!(m.roster().len(), 1);
        assert_eq!(
            m.roster().get(&uid("guest-1")).map(|p| p.name.as_str()),
            Some("Ada")
        );
    }

    #[test]
    fn join_result_without_request_is_ignored() {
        let mut m = machine();
        let effects = m.apply(
            SessionInput::JoinResolved(Resolved::succeeded(JoinedSession::default())),
            now(),
        );
        assert!(effects.is_empty());
        assert_eq!(m.view(), SessionView::Join);
    }

    // -------------------------------------------------------------------------
    // lobby
    // -------------------------------------------------------------------------

    #[test]
    fn countdown_moves_to_prompt_and_starts_round() {
        let (mut m, token) = in_lobby();
        let effects = m.apply(SessionInput::TimerElapsed(token), now());

        assert_eq!(m.view(), SessionView::Prompt);
        assert_eq!(effects, vec![SessionEffect::StartRound { session_id: sid() }]);
    }

    #[test]
    fn round_start_moves_to_prompt_without_starting_round() {
        let (mut m, token) = in_lobby();
        let effects = server(
            &mut m,
            ServerMessage::RoundStart {
                session_id: Some("ABC123".into()),
                condition: Some("Underwater volcano".into()),
            },
        );

        assert!(effects.is_empty());
        assert_eq!(m.view(), SessionView::Prompt);
        assert_eq!(m.condition(), Some("Underwater volcano"));

        // The lobby countdown is now stale
        let effects = m.apply(SessionInput::TimerElapsed(token), now());
        assert!(effects.is_empty());
        assert_eq!(m.view(), SessionView::Prompt);
    }

    #[test]
    fn round_start_in_prompt_only_updates_condition() {
        let mut m = in_prompt();
        let epoch = m.epoch();
        server(
            &mut m,
            ServerMessage::RoundStart {
                session_id: None,
                condition: Some("Zero gravity".into()),
            },
        );
        assert_eq!(m.view(), SessionView::Prompt);
        assert_eq!(m.epoch(), epoch);
        assert_eq!(m.condition(), Some("Zero gravity"));
    }

    // -------------------------------------------------------------------------
    // prompt
    // -------------------------------------------------------------------------

    #[test]
    fn prompt_submit_generates_character() {
        let mut m = in_prompt();
        let effects = m.apply(SessionInput::PromptSubmitted(" A kraken ".into()), now());

        assert_eq!(
            effects,
            vec![SessionEffect::GenerateCharacter {
                session_id: sid(),
                user_id: uid("Ada"),
                prompt: CharacterPrompt::new("A kraken").unwrap(),
            }]
        );
        assert!(m.is_generating());

        let again = m.apply(SessionInput::PromptSubmitted("A toaster".into()), now());
        assert!(again.is_empty());
    }

    #[test]
    fn empty_prompt_sets_form_error() {
        let mut m = in_prompt();
        let effects = m.apply(SessionInput::PromptSubmitted(String::new()), now());

        assert!(effects.is_empty());
        assert_eq!(m.prompt_error(), Some("Describe your fighter first"));
        assert!(!m.is_generating());
    }

    #[test]
    fn generation_failure_still_reaches_waiting_with_placeholder() {
        let mut m = in_prompt();
        m.apply(SessionInput::PromptSubmitted("A kraken".into()), now());
        let effects = m.apply(
            SessionInput::CharacterResolved(Resolved::fell_back(CharacterImage::Placeholder)),
            now(),
        );

        assert_eq!(m.view(), SessionView::Waiting);
        assert_eq!(m.character(), Some(&CharacterImage::Placeholder));
        assert!(m.is_offline());
        assert_eq!(effects[0], SessionEffect::CharacterReady { session_id: sid() });
        assert_eq!(timer_token(&effects).kind, TimerKind::WaitingFallback);
    }

    // -------------------------------------------------------------------------
    // waiting / battle
    // -------------------------------------------------------------------------

    #[test]
    fn battle_start_moves_waiting_to_battle() {
        let (mut m, _) = in_waiting();
        let effects = server(
            &mut m,
            ServerMessage::BattleStart {
                session_id: Some("ABC123".into()),
            },
        );

        assert_eq!(m.view(), SessionView::Battle);
        assert_eq!(timer_token(&effects).kind, TimerKind::BattleFallback);
    }

    #[test]
    fn all_characters_ready_moves_waiting_to_battle() {
        let (mut m, waiting_token) = in_waiting();
        server(&mut m, ServerMessage::AllCharactersReady { session_id: None });
        assert_eq!(m.view(), SessionView::Battle);

        // The waiting fallback no longer applies
        let effects = m.apply(SessionInput::TimerElapsed(waiting_token), now());
        assert!(effects.is_empty());
    }

    #[test]
    fn battle_signal_outside_waiting_is_ignored() {
        let mut m = in_prompt();
        let effects = server(&mut m, ServerMessage::BattleStart { session_id: None });
        assert!(effects.is_empty());
        assert_eq!(m.view(), SessionView::Prompt);
    }

    #[test]
    fn battle_fallback_fetches_results() {
        let (mut m, token) = in_battle();
        let effects = m.apply(SessionInput::TimerElapsed(token), now());

        assert_eq!(effects, vec![SessionEffect::FetchResults { session_id: sid() }]);
        assert_eq!(m.view(), SessionView::Battle);

        let results = BattleResults::new(uid("Bob"), "script", "Bob wins");
        m.apply(SessionInput::ResultsFetched(results.clone()), now());
        assert_eq!(m.view(), SessionView::Results);
        assert_eq!(m.results(), Some(&results));
        assert_eq!(m.local_player_won(), Some(false));
    }

    // -------------------------------------------------------------------------
    // results
    // -------------------------------------------------------------------------

    #[test]
    fn results_event_renders_summary_verbatim() {
        let (mut m, _) = in_battle();
        let summary = "Ada's kraken out-inked the toaster.\n  (barely)";
        server(&mut m, results_event(Some("ABC123"), summary));

        assert_eq!(m.view(), SessionView::Results);
        let results = m.results().unwrap();
        assert_eq!(results.battle_summary, summary);
        assert_eq!(results.battle_script, "Round one...");
        assert_eq!(m.local_player_won(), Some(true));
    }

    #[test]
    fn results_are_accepted_from_any_view_and_last_wins() {
        let mut m = machine();
        server(&mut m, results_event(None, "first"));
        assert_eq!(m.view(), SessionView::Results);

        server(&mut m, results_event(None, "second"));
        assert_eq!(m.results().unwrap().battle_summary, "second");
    }

    #[test]
    fn late_fetched_results_do_not_override_push() {
        let (mut m, _) = in_battle();
        server(&mut m, results_event(None, "pushed"));
        let effects = m.apply(
            SessionInput::ResultsFetched(BattleResults::new(uid("Bob"), "s", "fetched")),
            now(),
        );
        assert!(effects.is_empty());
        assert_eq!(m.results().unwrap().battle_summary, "pushed");
    }

    #[test]
    fn restart_only_from_results() {
        let mut m = in_prompt();
        assert!(m.apply(SessionInput::Restart, now()).is_empty());

        server(&mut m, results_event(None, "done"));
        assert_eq!(
            m.apply(SessionInput::Restart, now()),
            vec![SessionEffect::Disconnect, SessionEffect::NavigateHome]
        );
    }

    // -------------------------------------------------------------------------
    // roster and cross-cutting rules
    // -------------------------------------------------------------------------

    #[test]
    fn duplicate_joins_do_not_duplicate_participant() {
        let (mut m, _) = in_lobby();
        for _ in 0..3 {
            server(
                &mut m,
                ServerMessage::UserJoinedSession {
                    session_id: Some("ABC123".into()),
                    user_id: "Bob".into(),
                    name: None,
                },
            );
        }

        assert_eq!(m.roster().len(), 2);
        assert_eq!(
            m.roster()
                .iter()
                .filter(|p| p.id.as_str() == "Bob")
                .count(),
            1
        );
    }

    #[test]
    fn join_without_name_keeps_known_name() {
        let (mut m, _) = in_lobby();
        server(
            &mut m,
            ServerMessage::UserJoinedSession {
                session_id: None,
                user_id: "Ada".into(),
                name: None,
            },
        );
        assert_eq!(m.roster().get(&uid("Ada")).unwrap().name, "Ada");
    }

    #[test]
    fn user_left_removes_participant() {
        let (mut m, _) = in_lobby();
        server(
            &mut m,
            ServerMessage::UserJoinedSession {
                session_id: None,
                user_id: "Bob".into(),
                name: Some("Bobby".into()),
            },
        );
        server(
            &mut m,
            ServerMessage::UserLeftSession {
                session_id: None,
                user_id: "Bob".into(),
            },
        );
        assert!(!m.roster().contains(&uid("Bob")));
    }

    #[test]
    fn participants_snapshot_replaces_roster() {
        let (mut m, _) = in_lobby();
        server(
            &mut m,
            ServerMessage::SessionParticipants {
                session_id: Some("ABC123".into()),
                participants: vec![
                    ParticipantEntry::Detailed {
                        user_id: "Cy".into(),
                        name: Some("Cyrus".into()),
                    },
                    ParticipantEntry::Id("Ada".into()),
                    ParticipantEntry::Id("Cy".into()),
                ],
            },
        );

        let names: Vec<&str> = m.roster().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cyrus", "Ada"]);
    }

    #[test]
    fn events_for_other_sessions_are_ignored() {
        let (mut m, _) = in_lobby();
        server(
            &mut m,
            ServerMessage::RoundStart {
                session_id: Some("ZZZ999".into()),
                condition: None,
            },
        );
        server(
            &mut m,
            ServerMessage::UserJoinedSession {
                session_id: Some("ZZZ999".into()),
                user_id: "Eve".into(),
                name: None,
            },
        );
        server(&mut m, results_event(Some("ZZZ999"), "not ours"));

        assert_eq!(m.view(), SessionView::Lobby);
        assert!(!m.roster().contains(&uid("Eve")));
        assert!(m.results().is_none());
    }

    #[test]
    fn timer_from_previous_view_is_ignored() {
        let (mut m, lobby_token) = in_lobby();
        m.apply(SessionInput::TimerElapsed(lobby_token), now());
        m.apply(SessionInput::PromptSubmitted("A kraken".into()), now());
        m.apply(
            SessionInput::CharacterResolved(Resolved::succeeded(CharacterImage::Placeholder)),
            now(),
        );
        assert_eq!(m.view(), SessionView::Waiting);

        // Same kind, old epoch
        let stale = TimerToken {
            kind: TimerKind::WaitingFallback,
            epoch: lobby_token.epoch,
        };
        assert!(m.apply(SessionInput::TimerElapsed(stale), now()).is_empty());
        assert_eq!(m.view(), SessionView::Waiting);
    }

    #[test]
    fn server_error_is_recorded_without_view_change() {
        let (mut m, _) = in_lobby();
        server(
            &mut m,
            ServerMessage::Error {
                message: "Session is full".into(),
            },
        );
        assert_eq!(m.last_server_error(), Some("Session is full"));
        assert_eq!(m.view(), SessionView::Lobby);
    }
}
