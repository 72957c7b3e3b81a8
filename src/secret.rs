//! Credential sources for provider authorization.
//!
//! A [`SecretSource`] is consulted at call time, on every authorized
//! request. Nothing here caches the resolved value, so rotating a key file
//! or environment variable takes effect without restarting the process.

use anyhow::{Context, Result, bail};
use std::fs;

use crate::paths;

/// Supplies a provider's credential string on demand.
pub trait SecretSource: Send + Sync {
    /// Resolves the credential. Called per request, never memoized.
    fn get(&self) -> Result<String>;
}

impl std::fmt::Debug for dyn SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn SecretSource")
    }
}

/// Reads the credential from a UTF-8 text file.
///
/// A leading `~` is expanded to the home directory and surrounding
/// whitespace is trimmed, so `echo`-created key files work as-is.
pub struct FileSecret {
    path: String,
}

impl FileSecret {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl SecretSource for FileSecret {
    fn get(&self) -> Result<String> {
        let path = paths::expand_tilde(&self.path)?;
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("could not read credential file: {}", path.display()))?;
        Ok(contents.trim().to_string())
    }
}

/// Reads the credential from an environment variable.
pub struct EnvSecret {
    var: String,
}

impl EnvSecret {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretSource for EnvSecret {
    fn get(&self) -> Result<String> {
        let value = std::env::var(&self.var)
            .with_context(|| format!("environment variable {} is not set", self.var))?;
        if value.trim().is_empty() {
            bail!("environment variable {} is empty", self.var);
        }
        Ok(value.trim().to_string())
    }
}

/// A credential stored inline (config literals, tests).
pub struct StaticSecret {
    key: String,
}

impl StaticSecret {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl SecretSource for StaticSecret {
    fn get(&self) -> Result<String> {
        Ok(self.key.clone())
    }
}
