use crate::ports::outbound::GeneratedImage;

/// The local player's fighter portrait
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterImage {
    Generated { bytes: Vec<u8>, content_type: String },
    /// Generation failed; the view shows the bundled placeholder art
    Placeholder,
}

impl CharacterImage {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Inline `data:` URL for a generated image
    pub fn data_url(&self) -> Option<String> {
        match self {
            Self::Generated {
                bytes,
                content_type,
            } => Some(format!(
                "data:{};base64,{}",
                content_type,
                base64::encode(bytes)
            )),
            Self::Placeholder => None,
        }
    }
}

impl From<GeneratedImage> for CharacterImage {
    fn from(image: GeneratedImage) -> Self {
        Self::Generated {
            bytes: image.bytes,
            content_type: image.content_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_image_becomes_data_url() {
        let image = CharacterImage::from(GeneratedImage {
            bytes: b"PNG".to_vec(),
            content_type: "image/png".into(),
        });
        assert!(!image.is_placeholder());
        assert_eq!(image.data_url().as_deref(), Some("data:image/png;base64,UE5H"));
    }

    #[test]
    fn placeholder_has_no_data_url() {
        assert!(CharacterImage::Placeholder.is_placeholder());
        assert_eq!(CharacterImage::Placeholder.data_url(), None);
    }
}
