use dioxus::prelude::*;

use nanotour_domain::Participant;

use crate::ui::presentation::components::primitives::{Badge, BadgeTone, Card};
use crate::ui::presentation::use_services;

#[component]
pub fn ParticipantList(participants: Vec<Participant>, me: Option<String>) -> Element {
    rsx! {
        ul {
            class: "participants",
            for participant in participants {
                li {
                    key: "{participant.id}",
                    class: "participant",
                    span { class: "participant-name", "{participant.name}" }
                    if me.as_deref() == Some(participant.id.as_str()) {
                        Badge { label: "you", tone: BadgeTone::Success }
                    }
                }
            }
        }
    }
}

fn countdown_text(remaining_secs: u64) -> String {
    match remaining_secs {
        0 => "The round is starting.".to_string(),
        secs => format!("The round starts in {}s.", secs),
    }
}

/// Roster while waiting for the round to start.
///
/// The countdown is display only; the session timer decides when the
/// round actually starts.
#[component]
pub fn LobbyView(
    session_id: String,
    participants: Vec<Participant>,
    me: Option<String>,
    countdown_secs: u64,
) -> Element {
    let count = participants.len();
    let platform = use_services().platform;
    let mut remaining = use_signal(|| countdown_secs);

    use_future(move || {
        let platform = platform.clone();
        async move {
            while remaining() > 0 {
                platform.sleep_ms(1000).await;
                remaining -= 1;
            }
        }
    });

    let countdown = countdown_text(remaining());

    rsx! {
        Card {
            title: "Lobby",
            p {
                class: "muted",
                "Share the code "
                strong { class: "code", "{session_id}" }
                " with a friend. {countdown}"
            }
            p { class: "muted", "{count} fighter(s) in the arena" }
            ParticipantList { participants, me }
        }
    }
}
