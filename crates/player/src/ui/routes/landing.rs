//! Landing screen: create a session or join one by code

use dioxus::prelude::*;

use nanotour_domain::SessionId;

use crate::application::JoinCodeForm;
use crate::ui::presentation::components::primitives::{
    Badge, BadgeTone, Card, OtpField, PrimaryButton,
};
use crate::ui::presentation::use_services;

use super::Route;

#[component]
pub fn LandingRoute() -> Element {
    let services = use_services();
    let navigator = use_navigator();
    let landing = use_hook(|| services.landing());

    let mut form = use_signal(JoinCodeForm::new);
    let mut creating = use_signal(|| false);

    let health_check = landing.clone();
    let backend = use_resource(move || {
        let landing = health_check.clone();
        async move { landing.backend_available().await }
    });

    let create = move |_| {
        if *creating.read() {
            return;
        }
        creating.set(true);
        let landing = landing.clone();
        spawn(async move {
            let created = landing.create_session().await;
            if created.is_fallback() {
                tracing::info!(session_id = %created.value, "Starting with a local session code");
            }
            creating.set(false);
            navigator.push(Route::battle(&created.value));
        });
    };

    let join = move || {
        if let Some(code) = form.read().submit() {
            navigator.push(Route::battle(&SessionId::from(code)));
        }
    };

    let code = form.read().code().to_string();
    let can_join = form.read().can_submit();

    rsx! {
        Card {
            title: "Start a battle",
            p {
                class: "muted",
                "Describe a fighter, let the judge narrate the fight, and see who wins."
            }
            PrimaryButton {
                label: "Create battle",
                loading: *creating.read(),
                loading_label: "Creating...",
                onclick: create,
            }
            div { class: "landing-divider", "or join with a code" }
            OtpField {
                value: code,
                on_change: move |raw: String| form.write().set_input(&raw),
                on_submit: move |_| join(),
            }
            PrimaryButton {
                label: "Join battle",
                disabled: !can_join,
                onclick: move |_| join(),
            }
            match *backend.read() {
                Some(true) => rsx! { Badge { label: "Backend online", tone: BadgeTone::Success } },
                Some(false) => rsx! { Badge { label: "Offline mode", tone: BadgeTone::Warning } },
                None => rsx! { Badge { label: "Checking backend...", tone: BadgeTone::Neutral } },
            }
        }
    }
}
