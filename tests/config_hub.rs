#![allow(clippy::unwrap_used)]
//! Configuration-to-hub contract tests.
//!
//! These tests verify that the TOML configuration drives hub construction:
//! the `hub.engines` list is the fallback priority order, every listed
//! engine needs a credential section, and credential resolution stays
//! deferred until a request is authorized.

use serial_test::serial;
use std::collections::HashMap;

use thub::config::{ConfigFile, EngineConfig, HubSettings, build_hub};

fn engine_with_inline_key(key: &str) -> EngineConfig {
    EngineConfig {
        api_key: Some(key.to_string()),
        ..EngineConfig::default()
    }
}

fn config_with_engines(names: &[&str]) -> ConfigFile {
    let mut engines = HashMap::new();
    for name in names {
        engines.insert((*name).to_string(), engine_with_inline_key("test-key"));
    }

    ConfigFile {
        hub: HubSettings {
            engines: names.iter().map(|n| (*n).to_string()).collect(),
            ..HubSettings::default()
        },
        engines,
    }
}

#[test]
fn test_engine_list_order_is_fallback_order() {
    let config = config_with_engines(&["google", "deepl"]);
    let hub = build_hub(&config).unwrap();
    assert_eq!(hub.engine_names(), vec!["Google", "DeepL"]);

    let config = config_with_engines(&["deepl", "google"]);
    let hub = build_hub(&config).unwrap();
    assert_eq!(hub.engine_names(), vec!["DeepL", "Google"]);
}

#[test]
fn test_engine_names_match_case_insensitively() {
    let config = config_with_engines(&["DeepL", "GOOGLE"]);
    let hub = build_hub(&config).unwrap();
    assert_eq!(hub.engine_names(), vec!["DeepL", "Google"]);
}

#[test]
fn test_listed_engine_requires_a_section() {
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
fn test_section_requires_a_credential() {
    let mut engines = HashMap::new();
    engines.insert("deepl".to_string(), EngineConfig::default());

    let config = ConfigFile {
        hub: HubSettings {
            engines: vec!["deepl".to_string()],
            ..HubSettings::default()
        },
        engines,
    };

    let err = build_hub(&config).unwrap_err();
    assert!(format!("{err:#}").contains("no credential configured"));
}

#[test]
#[serial]
fn test_env_credential_resolution_is_deferred() {
    let engine = EngineConfig {
        api_key_env: Some("THUB_DEFERRED_TEST_KEY".to_string()),
        ..EngineConfig::default()
    };

    // Building the source must not require the variable to exist yet.
    // SAFETY: test-specific env var, guarded by #[serial]
    unsafe { std::env::remove_var("THUB_DEFERRED_TEST_KEY") };
    let secret = engine.secret_source().unwrap();
    assert!(secret.get().is_err());

    // SAFETY: same test-specific env var
    unsafe { std::env::set_var("THUB_DEFERRED_TEST_KEY", "late-key") };
    assert_eq!(secret.get().unwrap(), "late-key");

    // SAFETY: cleanup
    unsafe { std::env::remove_var("THUB_DEFERRED_TEST_KEY") };
}
