//! Presentation layer with the command-line front end.

/// Subcommand handlers.
pub mod cli;

pub use cli::App;
