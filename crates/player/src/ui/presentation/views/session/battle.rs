use dioxus::prelude::*;

use crate::ui::presentation::components::primitives::Card;

#[component]
pub fn BattleView() -> Element {
    rsx! {
        Card {
            class: "battle",
            div {
                class: "clash",
                span { class: "clash-spark" }
                span { class: "clash-spark clash-spark-late" }
            }
            h2 { class: "card-title", "Battle in progress" }
            p { class: "muted", "The judge is narrating the fight..." }
        }
    }
}
