/// Command-line parsing and command dispatch
pub mod cli;
/// Grid, encoding, hashing and corpus constants
pub mod configuration;
/// Error types and record context
pub mod error;
/// Diagnostic log setup
pub mod logging;
/// Import progress display
pub mod progress;
