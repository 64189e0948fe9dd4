use dioxus::prelude::*;

pub mod presentation;
pub mod routes;

pub use routes::Route;

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    rsx! {
        div {
            class: "app-shell",
            header {
                class: "app-header",
                h1 { class: "app-title", "Nano Tournament" }
            }
            main {
                class: "app-main",
                Router::<Route> {}
            }
        }
    }
}
