use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use crate::hub::Hub;
use crate::paths;
use crate::secret::{EnvSecret, FileSecret, SecretSource, StaticSecret};

/// Settings in the `[hub]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubSettings {
    /// Engine names in fallback priority order.
    #[serde(default)]
    pub engines: Vec<String>,
    /// Default target language.
    pub to: Option<String>,
    /// Default source language.
    pub from: Option<String>,
}

/// Credential settings for one engine (`[engines.<name>]` section).
///
/// Exactly one source is used, in this order of preference: key file,
/// environment variable, inline literal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to a file holding the API key (leading `~` is expanded).
    #[serde(default)]
    pub api_key_file: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
}

impl EngineConfig {
    /// Builds the deferred credential source for this engine.
    ///
    /// The returned source re-reads the file or environment variable on
    /// every request; only which source to use is decided here.
    pub fn secret_source(&self) -> Result<Arc<dyn SecretSource>> {
        if let Some(path) = &self.api_key_file {
            return Ok(Arc::new(FileSecret::new(path.clone())));
        }
        if let Some(var) = &self.api_key_env {
            return Ok(Arc::new(EnvSecret::new(var.clone())));
        }
        if let Some(key) = &self.api_key {
            return Ok(Arc::new(StaticSecret::new(key.clone())));
        }
        bail!("no credential configured: set api_key_file, api_key_env, or api_key")
    }

    /// A short description of where the credential comes from.
    pub fn credential_source(&self) -> &'static str {
        if self.api_key_file.is_some() {
            "key file"
        } else if self.api_key_env.is_some() {
            "environment variable"
        } else if self.api_key.is_some() {
            "inline key"
        } else {
            "(no credential)"
        }
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/thub/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Hub settings, including fallback order.
    #[serde(default)]
    pub hub: HubSettings,
    /// Engine credential sections keyed by name.
    #[serde(default)]
    pub engines: HashMap<String, EngineConfig>,
}

/// Constructs a [`Hub`] from the configuration file.
///
/// Engines are registered in `hub.engines` order, which is the fallback
/// priority order.
///
/// # Errors
///
/// Returns an error if a listed engine has no `[engines.<name>]` section or
/// no credential source configured.
pub fn build_hub(config: &ConfigFile) -> Result<Hub> {
    let mut hub = Hub::new();

    for name in &config.hub.engines {
        let engine = config.engines.get(name).ok_or_else(|| {
            anyhow::anyhow!(
                "Engine '{name}' is listed in hub.engines but has no [engines.{name}] section\n\n\
                 Add a section to ~/.config/thub/config.toml:\n  \
                 [engines.{name}]\n  \
                 api_key_file = \"~/.config/thub/{name}.key\""
            )
        })?;

        let secret = engine
            .secret_source()
            .with_context(|| format!("engine '{name}'"))?;
        hub.add_provider(name, secret);
    }

    Ok(hub)
}

/// Manages loading the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is read from `$XDG_CONFIG_HOME/thub/config.toml`
    /// or `~/.config/thub/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Creates a config manager reading from an explicit path.
    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile =
            toml::from_str(&contents).with_context(|| "Failed to parse config file")?;

        Ok(config_file)
    }

    pub fn load_or_default(&self) -> ConfigFile {
        self.load().unwrap_or_default()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn engine_with_inline_key(key: &str) -> EngineConfig {
        EngineConfig {
            api_key: Some(key.to_string()),
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");
        fs::write(
            &config_path,
            r#"
[hub]
engines = ["deepl", "google"]
to = "fr"

[engines.deepl]
api_key_file = "~/.config/thub/deepl.key"

[engines.google]
api_key_env = "GOOGLE_TRANSLATE_API_KEY"
"#,
        )
        .unwrap();

        let manager = ConfigManager::with_path(config_path);
        let config = manager.load().unwrap();

        assert_eq!(config.hub.engines, vec!["deepl", "google"]);
        assert_eq!(config.hub.to, Some("fr".to_string()));
        assert_eq!(
            config.engines["deepl"].api_key_file,
            Some("~/.config/thub/deepl.key".to_string())
        );
        assert_eq!(
            config.engines["google"].api_key_env,
            Some("GOOGLE_TRANSLATE_API_KEY".to_string())
        );
    }

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = ConfigManager::with_path(temp_dir.path().join("config.toml"));

        assert!(manager.load().is_err());
        assert!(manager.load_or_default().hub.engines.is_empty());
    }

    #[test]
    fn test_secret_source_prefers_file_over_env_over_inline() {
        let engine = EngineConfig {
            api_key_file: None,
            api_key_env: None,
            api_key: Some("inline".to_string()),
        };
        assert_eq!(engine.credential_source(), "inline key");

        let engine = EngineConfig {
            api_key_env: Some("KEY".to_string()),
            ..engine
        };
        assert_eq!(engine.credential_source(), "environment variable");

        let engine = EngineConfig {
            api_key_file: Some("/tmp/key".to_string()),
            ..engine
        };
        assert_eq!(engine.credential_source(), "key file");
    }

    #[test]
    fn test_secret_source_requires_a_credential() {
        let engine = EngineConfig::default();
        let err = engine.secret_source().unwrap_err();
        assert!(err.to_string().contains("no credential configured"));
    }

    #[test]
    fn test_build_hub_preserves_engine_order() {
        let mut engines = HashMap::new();
        engines.insert("google".to_string(), engine_with_inline_key("g"));
        engines.insert("deepl".to_string(), engine_with_inline_key("d"));

        let config = ConfigFile {
            hub: HubSettings {
                engines: vec!["google".to_string(), "deepl".to_string()],
                ..HubSettings::default()
            },
            engines,
        };

        let hub = build_hub(&config).unwrap();
        assert_eq!(hub.engine_names(), vec!["Google", "DeepL"]);
    }

    #[test]
    fn test_build_hub_missing_engine_section() {
        let config = ConfigFile {
            hub: HubSettings {
                engines: vec!["deepl".to_string()],
                ..HubSettings::default()
            },
            engines: HashMap::new(),
        };

        let err = build_hub(&config).unwrap_err();
        assert!(err.to_string().contains("[engines.deepl]"));
    }

    #[test]
    fn test_build_hub_unknown_engine_kind_is_skipped() {
        let mut engines = HashMap::new();
        engines.insert("bing".to_string(), engine_with_inline_key("b"));

        let config = ConfigFile {
            hub: HubSettings {
                engines: vec!["bing".to_string()],
                ..HubSettings::default()
            },
            engines,
        };

        // Unknown kinds pass configuration but the hub ignores them.
        let hub = build_hub(&config).unwrap();
        assert!(hub.is_empty());
    }
}
