//! Validated value objects

mod names;
mod session_code;

pub use names::{CharacterPrompt, DisplayName};
pub use session_code::SessionCode;
