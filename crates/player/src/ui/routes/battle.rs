//! Session screen
//!
//! Owns the `SessionMachine` for one session id. User intent and server
//! pushes both go through [`SessionDriver::send`]; the effects the machine
//! returns run on Dioxus tasks scoped to this screen, so leaving the screen
//! cancels pending timers and requests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::prelude::*;
use dioxus::router::Navigator;
use tokio::sync::mpsc;

use nanotour_domain::SessionId;
use nanotour_shared::ServerMessage;

use crate::application::{
    EventSubscription, SessionEffect, SessionInput, SessionMachine, SessionService, SessionView,
};
use crate::ports::outbound::{storage_keys, ConnectionState, PlatformPort};
use crate::ui::presentation::components::primitives::{Badge, BadgeTone, Card};
use crate::ui::presentation::use_services;
use crate::ui::presentation::views::session::{
    BattleView, JoinView, LobbyView, PromptView, ResultsView, WaitingView,
};

use super::Route;

#[component]
pub fn BattleRoute(segments: Vec<String>) -> Element {
    match SessionId::from_route_segments(&segments) {
        Some(session_id) => {
            let key = session_id.to_string();
            rsx! {
                SessionScreen { key: "{key}", session_id }
            }
        }
        None => rsx! {
            Card {
                title: "No session here",
                p { class: "muted", "This link does not name a battle." }
                Link { class: "link", to: Route::LandingRoute {}, "Back to the start" }
            }
        },
    }
}

const CONNECTION_POLL_MS: u64 = 1000;

/// Header badge for the session socket
fn connection_badge(state: ConnectionState) -> (&'static str, BadgeTone) {
    match state {
        ConnectionState::Connected => ("Live", BadgeTone::Success),
        ConnectionState::Connecting => ("Connecting", BadgeTone::Neutral),
        ConnectionState::Disconnected => ("Not connected", BadgeTone::Warning),
        ConnectionState::Failed => ("Connection lost", BadgeTone::Warning),
    }
}

/// Feeds inputs into the machine and runs the resulting effects
#[derive(Clone)]
struct SessionDriver {
    machine: Signal<SessionMachine>,
    service: SessionService,
    platform: Arc<dyn PlatformPort>,
    navigator: Navigator,
}

impl SessionDriver {
    fn send(&self, input: SessionInput) {
        let mut machine = self.machine;
        let effects = machine.write().apply(input, self.platform.now());
        if effects.is_empty() {
            return;
        }

        let driver = self.clone();
        spawn(async move {
            for effect in effects {
                driver.run(effect).await;
            }
        });
    }

    async fn run(&self, effect: SessionEffect) {
        match effect {
            SessionEffect::NavigateHome => {
                self.navigator.push(Route::LandingRoute {});
            }
            // Timers must not hold up the effects queued behind them.
            timer @ SessionEffect::StartTimer { .. } => {
                let driver = self.clone();
                spawn(async move {
                    if let Some(next) = driver.service.execute(timer).await {
                        driver.send(next);
                    }
                });
            }
            effect => {
                if let Some(next) = self.service.execute(effect).await {
                    self.send(next);
                }
            }
        }
    }
}

#[component]
fn SessionScreen(session_id: SessionId) -> Element {
    let services = use_services();
    let navigator = use_navigator();
    let timings = services.timings;

    let machine = use_signal({
        let session_id = session_id.clone();
        move || SessionMachine::new(session_id, timings)
    });

    let driver = use_hook(|| SessionDriver {
        machine,
        service: services.session(),
        platform: Arc::clone(&services.platform),
        navigator,
    });

    // Socket handlers run off the UI thread; hand their messages over a
    // channel to a task that owns the machine.
    let subscription: Rc<RefCell<Option<EventSubscription>>> = use_hook(|| {
        let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
        let subscription = driver.service.subscribe_events(move |message| {
            let _ = tx.send(message);
        });

        let driver = driver.clone();
        spawn(async move {
            while let Some(message) = rx.recv().await {
                driver.send(SessionInput::Server(message));
            }
        });

        Rc::new(RefCell::new(Some(subscription)))
    });

    use_drop({
        let connection = Arc::clone(&services.connection);
        move || {
            subscription.borrow_mut().take();
            connection.disconnect();
        }
    });

    // The socket reports its state without events, so sample it
    let mut socket_state = use_signal(|| services.connection.state());
    use_future({
        let connection = Arc::clone(&services.connection);
        let platform = Arc::clone(&services.platform);
        move || {
            let connection = Arc::clone(&connection);
            let platform = Arc::clone(&platform);
            async move {
                loop {
                    platform.sleep_ms(CONNECTION_POLL_MS).await;
                    let state = connection.state();
                    if socket_state() != state {
                        socket_state.set(state);
                    }
                }
            }
        }
    });

    let initial_name = use_hook(|| {
        services
            .platform
            .storage_load(storage_keys::DISPLAY_NAME)
            .unwrap_or_default()
    });

    let state = machine.read();
    let me = state.user_id().map(|id| id.to_string());
    let participants: Vec<_> = state.roster().iter().cloned().collect();
    let offline = state.is_offline();
    let server_error = state.last_server_error().map(str::to_string);
    let show_connection = state.view() != SessionView::Join && !offline;
    let (connection_label, connection_tone) = connection_badge(socket_state());

    let body = match state.view() {
        SessionView::Join => {
            let driver = driver.clone();
            rsx! {
                JoinView {
                    session_id: session_id.to_string(),
                    initial_name: initial_name.clone(),
                    error: state.name_error().map(str::to_string),
                    joining: state.is_joining(),
                    on_submit: move |name: String| driver.send(SessionInput::NameSubmitted(name)),
                }
            }
        }
        SessionView::Lobby => rsx! {
            LobbyView {
                session_id: session_id.to_string(),
                participants: participants.clone(),
                me: me.clone(),
                countdown_secs: timings.lobby_countdown.as_secs(),
            }
        },
        SessionView::Prompt => {
            let driver = driver.clone();
            rsx! {
                PromptView {
                    condition: state.condition().map(str::to_string),
                    error: state.prompt_error().map(str::to_string),
                    generating: state.is_generating(),
                    on_submit: move |prompt: String| driver.send(SessionInput::PromptSubmitted(prompt)),
                }
            }
        }
        SessionView::Waiting => {
            let opponents = participants
                .iter()
                .filter(|p| me.as_deref() != Some(p.id.as_str()))
                .count();
            rsx! {
                WaitingView {
                    image: state.character().cloned(),
                    opponents,
                }
            }
        }
        SessionView::Battle => rsx! { BattleView {} },
        SessionView::Results => match state.results().cloned() {
            Some(results) => {
                let winner_name = state
                    .roster()
                    .get(&results.winner_user_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| results.winner_user_id.to_string());
                let driver = driver.clone();
                rsx! {
                    ResultsView {
                        results,
                        winner_name,
                        won: state.local_player_won(),
                        on_restart: move |_| driver.send(SessionInput::Restart),
                    }
                }
            }
            None => rsx! { BattleView {} },
        },
    };
    drop(state);

    rsx! {
        div {
            class: "session-screen",
            div {
                class: "app-header",
                span { class: "code", "{session_id}" }
                if offline {
                    Badge { label: "Offline mode", tone: BadgeTone::Warning }
                }
                if show_connection {
                    Badge { label: "{connection_label}", tone: connection_tone }
                }
            }
            if let Some(message) = server_error {
                div { class: "notice", "{message}" }
            }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_badge_warns_unless_connected() {
        assert_eq!(
            connection_badge(ConnectionState::Connected),
            ("Live", BadgeTone::Success)
        );
        assert_eq!(connection_badge(ConnectionState::Connecting).1, BadgeTone::Neutral);
        assert_eq!(connection_badge(ConnectionState::Disconnected).1, BadgeTone::Warning);
        assert_eq!(connection_badge(ConnectionState::Failed).1, BadgeTone::Warning);
    }
}
