//! Cheerpaw UI Components
//!
//! Dioxus components that paint the interaction document and report the
//! viewer's input back as [`DomEvent`](cheerpaw_core::DomEvent)s. The host
//! owns the [`Interactions`](cheerpaw_core::Interactions) signal and decides
//! what each event does.

pub mod components;

pub use components::*;
