//! XDG-style path utilities and home-directory expansion.

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Returns the configuration directory for thub.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/thub` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/thub` otherwise
pub fn config_dir() -> Result<PathBuf> {
    match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) => Ok(PathBuf::from(xdg).join("thub")),
        Err(_) => Ok(home_dir()?.join(".config").join("thub")),
    }
}

/// Expands a leading `~` or `~/` to the current user's home directory.
///
/// Any other path is returned unchanged.
pub fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path == "~" || path.starts_with("~/") {
        Ok(expand_tilde_in(path, &home_dir()?))
    } else {
        Ok(PathBuf::from(path))
    }
}

fn expand_tilde_in(path: &str, home: &std::path::Path) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => home.to_path_buf(),
    }
}

/// Returns the user's home directory.
fn home_dir() -> Result<PathBuf> {
    dirs::home_dir().context("Failed to determine home directory")
}
