//! Rendering components for the interaction document.

mod dom_view;
mod layout;
mod toast;

pub use dom_view::*;
pub use layout::*;
pub use toast::*;
