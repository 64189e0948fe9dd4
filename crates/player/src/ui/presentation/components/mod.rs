//! Reusable UI components

pub mod primitives;
