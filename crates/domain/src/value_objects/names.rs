//! Validated free-text inputs from the session screen
//!
//! Both newtypes are trimmed and length-checked on construction, so the
//! view-state machine never forwards an empty name or prompt to the backend.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for a display name
const MAX_DISPLAY_NAME_LENGTH: usize = 32;

/// Maximum length for a character prompt
const MAX_PROMPT_LENGTH: usize = 500;

// ============================================================================
// DisplayName
// ============================================================================

/// A validated display name (non-empty, <=32 chars, trimmed)
///
/// The backend registers users under their display name, so this doubles as
/// the user id once the player has joined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Create a new validated display name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or longer
    /// than 32 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Display name cannot be empty"));
        }
        if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "Display name cannot exceed {} characters",
                MAX_DISPLAY_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DisplayName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DisplayName> for String {
    fn from(name: DisplayName) -> String {
        name.0
    }
}

// ============================================================================
// CharacterPrompt
// ============================================================================

/// A validated character description sent to image generation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterPrompt(String);

impl CharacterPrompt {
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed prompt is empty or
    /// longer than 500 characters.
    pub fn new(prompt: impl Into<String>) -> Result<Self, DomainError> {
        let prompt = prompt.into();
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Describe your fighter first"));
        }
        if trimmed.chars().count() > MAX_PROMPT_LENGTH {
            return Err(DomainError::validation(format!(
                "Character description cannot exceed {} characters",
                MAX_PROMPT_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterPrompt {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterPrompt> for String {
    fn from(prompt: CharacterPrompt) -> String {
        prompt.0
    }
}
