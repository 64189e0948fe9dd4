use dioxus::prelude::*;

use nanotour_domain::BattleResults;

use crate::ui::presentation::components::primitives::{Badge, BadgeTone, Card, PrimaryButton};

/// Winner and narrative. The script and summary render exactly as received.
#[component]
pub fn ResultsView(
    results: BattleResults,
    winner_name: String,
    won: Option<bool>,
    on_restart: EventHandler<()>,
) -> Element {
    let headline = match won {
        Some(true) => "You won!".to_string(),
        _ => format!("{} wins", winner_name),
    };
    let summary = results.battle_summary;
    let script = results.battle_script;

    rsx! {
        Card {
            title: "{headline}",
            if won == Some(true) {
                Badge { label: "Champion", tone: BadgeTone::Success }
            }
            p { class: "summary", "{summary}" }
            details {
                class: "script",
                summary { "Full battle script" }
                pre { "{script}" }
            }
            PrimaryButton {
                label: "Play again",
                onclick: move |_| on_restart.call(()),
            }
        }
    }
}
