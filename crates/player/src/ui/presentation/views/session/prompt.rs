use dioxus::prelude::*;

use crate::ui::presentation::components::primitives::{Card, PrimaryButton, TextField};

/// Character description entry
#[component]
pub fn PromptView(
    condition: Option<String>,
    error: Option<String>,
    generating: bool,
    on_submit: EventHandler<String>,
) -> Element {
    let mut prompt = use_signal(String::new);

    let submit = move || on_submit.call(prompt.read().clone());

    rsx! {
        Card {
            title: "Describe your fighter",
            if let Some(condition) = condition {
                div {
                    class: "condition",
                    span { class: "condition-label", "Arena: " }
                    "{condition}"
                }
            }
            TextField {
                value: prompt.read().clone(),
                placeholder: "A kraken in a tuxedo wielding a rubber chicken",
                error: error,
                disabled: generating,
                multiline: true,
                max_length: 500,
                on_input: move |value: String| prompt.set(value),
                on_submit: move |_| submit(),
            }
            PrimaryButton {
                label: "Create character",
                loading: generating,
                loading_label: "Summoning your fighter...",
                onclick: move |_| submit(),
            }
        }
    }
}
