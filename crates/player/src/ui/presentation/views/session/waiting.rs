use dioxus::prelude::*;

use crate::application::CharacterImage;
use crate::ui::presentation::assets::character_image_url;
use crate::ui::presentation::components::primitives::{Badge, BadgeTone, Card};

#[component]
pub fn WaitingView(image: Option<CharacterImage>, opponents: usize) -> Element {
    let placeholder = image.as_ref().map_or(true, CharacterImage::is_placeholder);
    let src = image
        .as_ref()
        .map(character_image_url)
        .unwrap_or_else(|| character_image_url(&CharacterImage::Placeholder));

    rsx! {
        Card {
            title: "Your fighter is ready",
            img { class: "portrait", src: "{src}", alt: "Your character" }
            if placeholder {
                Badge { label: "Stand-in art", tone: BadgeTone::Warning }
            }
            p {
                class: "muted",
                if opponents == 0 {
                    "Waiting for a challenger..."
                } else {
                    "Waiting for {opponents} other fighter(s) to finish..."
                }
            }
        }
    }
}
