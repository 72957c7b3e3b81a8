//! The hub: an ordered list of providers and the fallback dispatch logic.
//!
//! Insertion order is fallback priority order. A translate request walks the
//! list (optionally narrowed to one engine), returns the first success, and
//! only reports an error once every eligible provider has failed.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::provider::{self, Provider};
use crate::secret::SecretSource;

/// Inbound translation request envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateRequest {
    pub source_language: String,
    pub target_language: String,
    pub text: String,
    /// Optional filter restricting dispatch to one named engine.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub engine: String,
}

impl TranslateRequest {
    /// The engine filter, with the unset/empty cases collapsed.
    fn engine_filter(&self) -> Option<&str> {
        if self.engine.is_empty() {
            None
        } else {
            Some(&self.engine)
        }
    }
}

/// Outbound translation response envelope.
///
/// Exactly one of `text` and `error` is meaningful: a successful response
/// carries the translation and an empty `error`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub source_language: String,
    pub target_language: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

/// One row of the usage report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageEntry {
    pub engine: String,
    pub count: u64,
    pub limit: u64,
    /// `count / limit` as a percentage, `"0.00%"` when the limit is zero.
    pub percent: String,
    /// The provider's error text when its usage call failed.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

/// Outbound usage report envelope, one entry per configured provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageReport {
    pub usage: Vec<UsageEntry>,
}

/// The orchestrator holding providers in fallback priority order.
///
/// The provider list is meant to be configured up front and treated as
/// read-only while requests are in flight.
#[derive(Default)]
pub struct Hub {
    providers: Vec<Box<dyn Provider>>,
}

impl std::fmt::Debug for Hub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hub")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider of a known kind, bound to `secret`.
    ///
    /// Kind names are matched case-insensitively; unknown names are ignored
    /// so configuration-driven lists survive typos without failing the whole
    /// deployment.
    pub fn add_provider(&mut self, name: &str, secret: Arc<dyn SecretSource>) {
        match name.to_ascii_lowercase().as_str() {
            "deepl" => self.push(Box::new(provider::deepl(secret))),
            "google" => self.push(Box::new(provider::google(secret))),
            _ => {}
        }
    }

    /// Appends an already-constructed provider at the end of the fallback
    /// chain.
    pub fn push(&mut self, provider: Box<dyn Provider>) {
        self.providers.push(provider);
    }

    pub fn clear_providers(&mut self) {
        self.providers.clear();
    }

    /// Provider names in fallback priority order.
    pub fn engine_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Dispatches `request` to the providers in order and returns the first
    /// success, or a response aggregating every failure.
    ///
    /// Providers are awaited strictly sequentially; a success stops the walk
    /// so later providers are never called.
    pub async fn translate(&self, request: &TranslateRequest) -> TranslateResponse {
        let filter = request.engine_filter();
        let mut errors = Vec::new();
        let mut tried = 0usize;

        for provider in &self.providers {
            if let Some(engine) = filter
                && !engine.eq_ignore_ascii_case(provider.name())
            {
                continue;
            }
            tried += 1;

            match provider
                .translate(
                    &request.text,
                    &request.source_language,
                    &request.target_language,
                )
                .await
            {
                Ok(text) => {
                    return TranslateResponse {
                        source_language: request.source_language.clone(),
                        target_language: request.target_language.clone(),
                        text,
                        error: String::new(),
                    };
                }
                Err(err) => errors.push(format!("{}: {err:#}", provider.name())),
            }
        }

        let error = if tried == 0 {
            // Nothing was eligible; silence here would be indistinguishable
            // from an empty translation.
            match filter {
                Some(engine) => format!("no configured provider matches engine '{engine}'"),
                None => "no providers configured".to_string(),
            }
        } else {
            errors.join("\n")
        };

        TranslateResponse {
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
            text: String::new(),
            error,
        }
    }

    /// Collects a usage entry from every provider, in order.
    ///
    /// A failing provider contributes an entry with zero counters and its
    /// error text rather than being omitted.
    pub async fn usage(&self) -> UsageReport {
        let mut usage = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let entry = match provider.usage().await {
                Ok(info) => UsageEntry {
                    engine: provider.name().to_string(),
                    count: info.count,
                    limit: info.limit,
                    percent: format_percent(info.count, info.limit),
                    message: String::new(),
                },
                Err(err) => UsageEntry {
                    engine: provider.name().to_string(),
                    count: 0,
                    limit: 0,
                    percent: format_percent(0, 0),
                    message: format!("{err:#}"),
                },
            };
            usage.push(entry);
        }

        UsageReport { usage }
    }
}

fn format_percent(count: u64, limit: u64) -> String {
    let percent = if limit == 0 {
        0.0
    } else {
        count as f64 / limit as f64 * 100.0
    };
    format!("{percent:.2}%")
}
