//! Global styles for the Cheerpaw window.

mod styles;

pub use styles::GLOBAL_STYLES;
