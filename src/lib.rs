//! # thub - Multi-Engine Translation Hub
//!
//! `thub` is a command-line tool that fronts several machine-translation
//! services (DeepL, Google Translate) behind one interface. A request is
//! dispatched to the configured engines in order until one of them succeeds.
//!
//! ## Features
//!
//! - **Ordered fallback**: engines are tried in configured priority order
//! - **Engine filter**: restrict a request to one named engine
//! - **Usage reporting**: per-engine quota/usage with percentages
//! - **Deferred credentials**: API keys are read on every request, so
//!   rotated keys take effect without a restart
//!
//! ## Quick Start
//!
//! ```bash
//! # Translate an argument
//! thub --to fr "Hello"
//!
//! # Translate from stdin
//! echo "Hello" | thub --to fr
//!
//! # Force one engine
//! thub --to fr --engine deepl "Hello"
//!
//! # Quota report
//! thub usage
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/thub/config.toml`:
//!
//! ```toml
//! [hub]
//! engines = ["deepl", "google"]
//! to = "fr"
//!
//! [engines.deepl]
//! api_key_file = "~/.config/thub/deepl.key"
//!
//! [engines.google]
//! api_key_env = "GOOGLE_TRANSLATE_API_KEY"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and hub construction.
pub mod config;

/// The hub: ordered provider dispatch and the request/response envelopes.
pub mod hub;

/// Input reading from arguments, files, and stdin.
pub mod input;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities and home-directory expansion.
pub mod paths;

/// Translation providers and the generic REST engine behind them.
pub mod provider;

/// Credential sources (file, environment variable, inline).
pub mod secret;

/// Terminal UI components (spinner, colors).
pub mod ui;
