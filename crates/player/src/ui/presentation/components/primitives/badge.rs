use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BadgeTone {
    #[default]
    Neutral,
    Success,
    Warning,
}

impl BadgeTone {
    fn class(self) -> &'static str {
        match self {
            BadgeTone::Neutral => "badge badge-neutral",
            BadgeTone::Success => "badge badge-success",
            BadgeTone::Warning => "badge badge-warning",
        }
    }
}

/// Small pill label
#[component]
pub fn Badge(label: String, #[props(default)] tone: BadgeTone) -> Element {
    rsx! {
        span {
            class: tone.class(),
            "{label}"
        }
    }
}
