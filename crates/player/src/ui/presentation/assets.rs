//! Bundled static assets

use crate::application::CharacterImage;

const PLACEHOLDER_SVG: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/images/placeholder.svg"
));

/// Stylesheet injected into the desktop window head
pub const PLAYER_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/css/player.css"
));

pub fn placeholder_image_url() -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        base64::encode(PLACEHOLDER_SVG)
    )
}

/// `src` for a character portrait, using the placeholder when generation failed
pub fn character_image_url(image: &CharacterImage) -> String {
    image.data_url().unwrap_or_else(placeholder_image_url)
}
