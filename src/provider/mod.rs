//! Translation providers.
//!
//! Each provider normalizes one third-party REST API (auth scheme, query
//! parameter names, HTTP method, response shape) behind the [`Provider`]
//! contract so the hub can treat them uniformly.

use anyhow::Result;
use async_trait::async_trait;

mod deepl;
mod google;
mod rest;

pub use deepl::deepl;
pub use google::google;
pub use rest::{Auth, RestConfig, RestProvider};

/// Usage counters reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageInfo {
    /// Units consumed so far (typically characters).
    pub count: u64,
    /// Quota ceiling for the current period.
    pub limit: u64,
}

/// One translation backend behind the uniform contract.
///
/// Failures cross this boundary as `Err` values carrying the provider name,
/// never as panics, so the hub can fall through to the next provider.
#[async_trait]
pub trait Provider: Send + Sync {
    /// The provider's display name (e.g. `"DeepL"`).
    fn name(&self) -> &str;

    /// Translates `text` into `target`.
    ///
    /// `source` is accepted for providers that need it but the built-in
    /// engines rely on source-language detection and do not send it.
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;

    /// Reports usage/quota counters for this provider.
    async fn usage(&self) -> Result<UsageInfo>;
}
