//! mal-covers - High-resolution MyAnimeList cover lookup.
//!
//! This crate keeps a persisted map from anime and manga ids to cover image
//! paths, rebuilt from remote cover lists when stale, and resolves page links
//! to absolute cover URLs against it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, ports and pure services.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing the command handlers.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "mal-covers";
