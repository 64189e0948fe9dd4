use dioxus::prelude::*;

#[component]
pub fn Card(
    children: Element,
    #[props(default)] title: Option<String>,
    #[props(default)] class: Option<String>,
) -> Element {
    let class = match class {
        Some(extra) => format!("card {}", extra),
        None => "card".to_string(),
    };

    rsx! {
        section {
            class: class,
            if let Some(title) = title {
                h2 { class: "card-title", "{title}" }
            }
            {children}
        }
    }
}
