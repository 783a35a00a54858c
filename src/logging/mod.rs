//! Logging for the annotator
//!
//! - Bracketed event formatting shared by every sink
//! - Dual logging (per-run file + stdout), stdout only if the file cannot be created

mod formatter;
mod setup;

pub use setup::setup_logging;
