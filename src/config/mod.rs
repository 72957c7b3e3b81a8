//! Configuration file management and hub construction.

mod manager;

pub use manager::{ConfigFile, ConfigManager, EngineConfig, HubSettings, build_hub};
