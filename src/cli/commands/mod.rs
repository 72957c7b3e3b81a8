//! Subcommand implementations.

/// Engine listing command handler.
pub mod engines;

/// Translation command handler.
pub mod translate;

/// Usage report command handler.
pub mod usage;
