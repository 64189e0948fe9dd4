//! Presentation layer: service context, primitives and session views

pub mod assets;
pub mod components;
pub mod services;
pub mod views;

pub use services::{use_services, UiServices};
