//! DeepL provider definition.
//!
//! API reference: <https://developers.deepl.com/docs/api-reference/translate>

use anyhow::{Result, anyhow};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::rest::{Auth, RestConfig, RestProvider};
use super::UsageInfo;
use crate::secret::SecretSource;

/// Builds the DeepL provider (free-tier endpoints).
pub fn deepl(secret: Arc<dyn SecretSource>) -> RestProvider {
    RestProvider::new(
        "DeepL",
        RestConfig {
            service_url: "https://api-free.deepl.com/v2/translate",
            usage_url: Some("https://api-free.deepl.com/v2/usage"),
            auth: Auth::Header {
                scheme: "DeepL-Auth-Key",
            },
            parse_translation: Some(parse_translation),
            parse_usage: Some(parse_usage),
            ..RestConfig::default()
        },
        secret,
    )
}

#[derive(Debug, Deserialize)]
struct TranslateBody {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

fn parse_translation(body: &str) -> Result<String> {
    // Failure bodies are often a plain error envelope rather than the
    // expected shape, so keep the raw body next to the decode error.
    let parsed: TranslateBody =
        serde_json::from_str(body).map_err(|err| anyhow!("{body} {err}"))?;

    parsed
        .translations
        .into_iter()
        .next()
        .map(|t| t.text)
        .ok_or_else(|| anyhow!("response contained no translations: {body}"))
}

fn parse_usage(body: &str) -> Result<UsageInfo> {
    let counters: HashMap<String, u64> =
        serde_json::from_str(body).map_err(|err| anyhow!("{body} {err}"))?;

    Ok(UsageInfo {
        count: counters.get("character_count").copied().unwrap_or(0),
        limit: counters.get("character_limit").copied().unwrap_or(0),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translation() {
        let body = r#"{"translations":[{"detected_source_language":"EN","text":"Bonjour"}]}"#;
        assert_eq!(parse_translation(body).unwrap(), "Bonjour");
    }

    #[test]
    fn test_parse_translation_takes_first_entry() {
        let body = r#"{"translations":[{"text":"Bonjour"},{"text":"Salut"}]}"#;
        assert_eq!(parse_translation(body).unwrap(), "Bonjour");
    }

    #[test]
    fn test_parse_translation_error_keeps_raw_body() {
        let body = r#"{"message":"Wrong endpoint. Use https://api-free.deepl.com"}"#;
        let err = parse_translation(body).unwrap_err();
        assert!(err.to_string().contains("Wrong endpoint"));
    }

    #[test]
    fn test_parse_translation_empty_list() {
        let err = parse_translation(r#"{"translations":[]}"#).unwrap_err();
        assert!(err.to_string().contains("no translations"));
    }

    #[test]
    fn test_parse_usage() {
        let body = r#"{"character_count":900,"character_limit":1000}"#;
        let usage = parse_usage(body).unwrap();
        assert_eq!(usage.count, 900);
        assert_eq!(usage.limit, 1000);
    }

    #[test]
    fn test_parse_usage_missing_fields_default_to_zero() {
        let usage = parse_usage("{}").unwrap();
        assert_eq!(usage, UsageInfo::default());
    }

    #[test]
    fn test_parse_usage_error_keeps_raw_body() {
        let err = parse_usage("quota page moved").unwrap_err();
        assert!(err.to_string().contains("quota page moved"));
    }
}
