use dioxus::prelude::*;

use crate::ui::presentation::components::primitives::{Card, PrimaryButton, TextField};

/// Name entry before joining
#[component]
pub fn JoinView(
    session_id: String,
    initial_name: String,
    error: Option<String>,
    joining: bool,
    on_submit: EventHandler<String>,
) -> Element {
    let mut name = use_signal(move || initial_name);

    let submit = move || on_submit.call(name.read().clone());

    rsx! {
        Card {
            title: "Join battle {session_id}",
            p { class: "muted", "Pick a name your opponents will see." }
            TextField {
                label: "Display name",
                value: name.read().clone(),
                placeholder: "e.g. Captain Kraken",
                error: error,
                disabled: joining,
                max_length: 32,
                on_input: move |value: String| name.set(value),
                on_submit: move |_| submit(),
            }
            PrimaryButton {
                label: "Join",
                loading: joining,
                loading_label: "Joining...",
                onclick: move |_| submit(),
            }
        }
    }
}
