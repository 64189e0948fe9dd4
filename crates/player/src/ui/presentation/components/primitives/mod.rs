//! Presentational primitives
//!
//! Thin wrappers over HTML elements with the game's styling. None of them
//! hold business state; values come in as props and changes go out through
//! event handlers.

mod badge;
mod button;
mod card;
mod otp_field;
mod text_field;

pub use badge::{Badge, BadgeTone};
pub use button::PrimaryButton;
pub use card::Card;
pub use otp_field::OtpField;
pub use text_field::TextField;
