//! Installs the global `tracing` subscriber and re-exports the log macros.
//! See `bin/logger_demo.rs` for a manual check.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
