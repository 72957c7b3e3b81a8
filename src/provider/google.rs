//! Google Cloud Translation provider definition.
//!
//! API reference: <https://cloud.google.com/translate/docs/reference/rest/v2/translate>

use anyhow::{Result, anyhow, bail};
use reqwest::Method;
use serde::Deserialize;
use std::sync::Arc;

use super::rest::{Auth, RestConfig, RestProvider};
use crate::secret::SecretSource;

/// Builds the Google Translate provider (basic/v2 API).
///
/// The v2 API has no usage endpoint; `usage()` is short-circuited to an
/// unsupported-operation error pointing at the Cloud Console quotas page.
pub fn google(secret: Arc<dyn SecretSource>) -> RestProvider {
    RestProvider::new(
        "Google",
        RestConfig {
            service_url: "https://translation.googleapis.com/language/translate/v2/",
            method: Method::POST,
            query_text: "q",
            query_target: "target",
            auth: Auth::Query { param: "key" },
            parse_translation: Some(parse_translation),
            usage_override: Some(|| {
                bail!(
                    "Not implemented: see \
                     https://console.cloud.google.com/apis/api/translate.googleapis.com/quotas"
                )
            }),
            ..RestConfig::default()
        },
        secret,
    )
}

#[derive(Debug, Deserialize)]
struct TranslateBody {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    message: String,
}

fn parse_translation(body: &str) -> Result<String> {
    match serde_json::from_str::<TranslateBody>(body) {
        Ok(parsed) => parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| anyhow!("response contained no translations: {body}")),
        Err(err) => {
            // Error responses come back as a flat {message} envelope; prefer
            // that message over the decode error when it is present.
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body)
                && !envelope.message.is_empty()
            {
                bail!("{}", envelope.message);
            }
            bail!("could not decode response '{body}': {err}")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_translation() {
        let body = r#"{"data":{"translations":[{"translatedText":"Bonjour"}]}}"#;
        assert_eq!(parse_translation(body).unwrap(), "Bonjour");
    }

    #[test]
    fn test_parse_translation_surfaces_error_message() {
        let body = r#"{"message":"API key not valid. Please pass a valid API key."}"#;
        let err = parse_translation(body).unwrap_err();
        assert_eq!(
            err.to_string(),
            "API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn test_parse_translation_unexpected_body_keeps_raw_text() {
        let err = parse_translation("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(err.to_string().contains("502 Bad Gateway"));
    }

    #[test]
    fn test_parse_translation_empty_list() {
        let err = parse_translation(r#"{"data":{"translations":[]}}"#).unwrap_err();
        assert!(err.to_string().contains("no translations"));
    }

    #[tokio::test]
    async fn test_usage_is_unsupported() {
        use crate::provider::Provider;
        use crate::secret::StaticSecret;

        let provider = google(Arc::new(StaticSecret::new("k")));
        let err = provider.usage().await.unwrap_err();
        assert!(err.to_string().contains("Not implemented"));
        assert!(err.to_string().contains("console.cloud.google.com"));
    }
}
