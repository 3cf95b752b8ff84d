//! JSONL session logging.
//!
//! Every run of the desktop host appends its `tracing` events to one JSONL
//! file per session and day, next to the usual console output:
//!
//! ```text
//! logs/
//! ├── 2026-10-19_default.jsonl
//! └── 2026-10-19_demo.jsonl
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use cheerpaw_core::logging::LoggingBuilder;
//!
//! let path = LoggingBuilder::new("./logs", "demo")
//!     .with_filter("cheerpaw=debug,cheerpaw_core=debug")
//!     .init()?;
//! ```
//!
//! ```bash
//! # Every cheer the server turned down
//! jq 'select(.msg == "cheer rejected")' logs/*.jsonl
//! ```

pub mod entry;
pub mod layer;
pub mod writer;

pub use entry::JsonLogEntry;
pub use layer::{JsonlLayer, LoggingBuilder};
pub use writer::{read_entries, SessionLogWriter};
