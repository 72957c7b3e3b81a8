//! The generic REST engine shared by all providers.
//!
//! A provider is a [`RestConfig`] (endpoints, method, query parameter names,
//! auth strategy, response parsers) plus a credential source. The request
//! path here is the same for every provider; only the configuration differs.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Url, header::AUTHORIZATION};
use std::sync::Arc;

use super::{Provider, UsageInfo};
use crate::secret::SecretSource;

/// Parses a translate response body into the translated text.
pub type TranslationParser = fn(&str) -> Result<String>;

/// Parses a usage response body into counters.
pub type UsageParser = fn(&str) -> Result<UsageInfo>;

/// How the credential is attached to an outbound request.
#[derive(Debug, Clone, Copy)]
pub enum Auth {
    /// `Authorization: <scheme> <key>` header.
    Header { scheme: &'static str },
    /// `?<param>=<key>` query parameter.
    Query { param: &'static str },
}

/// Static configuration for one REST provider.
///
/// Unset fields take the defaults from [`RestConfig::default`]; the usage
/// URL additionally defaults to the service URL with `"usage"` appended.
/// A provider without parsers is valid and yields empty successes.
pub struct RestConfig {
    pub service_url: &'static str,
    pub usage_url: Option<&'static str>,
    pub method: Method,
    pub query_text: &'static str,
    pub query_target: &'static str,
    pub auth: Auth,
    pub parse_translation: Option<TranslationParser>,
    pub parse_usage: Option<UsageParser>,
    /// Replaces the network path for translate calls entirely.
    pub translate_override: Option<fn() -> Result<String>>,
    /// Replaces the network path for usage calls entirely. Used by engines
    /// whose API offers no usage endpoint.
    pub usage_override: Option<fn() -> Result<UsageInfo>>,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            service_url: "",
            usage_url: None,
            method: Method::GET,
            query_text: "text",
            query_target: "target_lang",
            auth: Auth::Header { scheme: "Bearer" },
            parse_translation: None,
            parse_usage: None,
            translate_override: None,
            usage_override: None,
        }
    }
}

/// A provider driven entirely by its [`RestConfig`].
pub struct RestProvider {
    name: &'static str,
    service_url: String,
    usage_url: String,
    method: Method,
    query_text: &'static str,
    query_target: &'static str,
    auth: Auth,
    parse_translation: Option<TranslationParser>,
    parse_usage: Option<UsageParser>,
    translate_override: Option<fn() -> Result<String>>,
    usage_override: Option<fn() -> Result<UsageInfo>>,
    secret: Arc<dyn SecretSource>,
    client: Client,
}

impl RestProvider {
    /// Builds a provider, applying configuration defaults exactly once.
    pub fn new(name: &'static str, config: RestConfig, secret: Arc<dyn SecretSource>) -> Self {
        let usage_url = config
            .usage_url
            .map_or_else(|| format!("{}usage", config.service_url), String::from);

        Self {
            name,
            service_url: config.service_url.to_string(),
            usage_url,
            method: config.method,
            query_text: config.query_text,
            query_target: config.query_target,
            auth: config.auth,
            parse_translation: config.parse_translation,
            parse_usage: config.parse_usage,
            translate_override: config.translate_override,
            usage_override: config.usage_override,
            secret,
            client: Client::new(),
        }
    }

    pub(crate) fn usage_url(&self) -> &str {
        &self.usage_url
    }

    /// Attaches the credential to an outbound request.
    ///
    /// The secret source is consulted on every call, never cached, so a
    /// rotated key is picked up without a restart.
    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let key = self
            .secret
            .get()
            .with_context(|| format!("{}: could not resolve credential", self.name))?;

        Ok(match self.auth {
            Auth::Header { scheme } => request.header(AUTHORIZATION, format!("{scheme} {key}")),
            Auth::Query { param } => request.query(&[(param, key.as_str())]),
        })
    }

    async fn exchange(&self, request: RequestBuilder) -> Result<String> {
        let response = request
            .send()
            .await
            .with_context(|| format!("{}: request failed", self.name))?;

        response
            .text()
            .await
            .with_context(|| format!("{}: could not read response body", self.name))
    }
}

#[async_trait]
impl Provider for RestProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn translate(&self, text: &str, _source: &str, target: &str) -> Result<String> {
        if let Some(short_circuit) = self.translate_override {
            return short_circuit();
        }

        let mut url = Url::parse(&self.service_url)
            .with_context(|| format!("{}: could not parse service url", self.name))?;
        url.query_pairs_mut()
            .append_pair(self.query_text, text)
            .append_pair(self.query_target, target);

        let request = self.client.request(self.method.clone(), url);
        let request = self.authorize(request)?;
        let body = self.exchange(request).await?;

        match self.parse_translation {
            Some(parse) => {
                parse(&body).with_context(|| format!("{}: bad translate response", self.name))
            }
            None => Ok(String::new()),
        }
    }

    async fn usage(&self) -> Result<UsageInfo> {
        if let Some(short_circuit) = self.usage_override {
            return short_circuit();
        }

        let url = Url::parse(&self.usage_url)
            .with_context(|| format!("{}: could not parse usage url", self.name))?;

        // Usage is always a plain GET, whatever the translate method is.
        let request = self.client.get(url);
        let request = self.authorize(request)?;
        let body = self.exchange(request).await?;

        match self.parse_usage {
            Some(parse) => {
                parse(&body).with_context(|| format!("{}: bad usage response", self.name))
            }
            None => Ok(UsageInfo::default()),
        }
    }
}
