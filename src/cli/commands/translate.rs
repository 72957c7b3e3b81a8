use anyhow::{Result, bail};
use std::io::{self, Write};

use crate::config::{ConfigFile, ConfigManager, build_hub};
use crate::hub::TranslateRequest;
use crate::input::InputReader;
use crate::ui::Spinner;

pub struct TranslateOptions {
    pub text: Option<String>,
    pub file: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub engine: Option<String>,
    pub json: bool,
}

pub async fn run_translate(options: TranslateOptions) -> Result<()> {
    let TranslateOptions {
        text,
        file,
        from,
        to,
        engine,
        json,
    } = options;

    let manager = ConfigManager::new()?;
    let config = manager.load_or_default();

    if text.is_some() && file.is_some() {
        crate::warn!("Warning: both TEXT and --file were given; using TEXT");
    }

    let source_text = match text {
        Some(text) => text,
        None => InputReader::read(file.as_deref())?,
    };

    if source_text.trim().is_empty() {
        bail!("Error: Input is empty");
    }

    let request = TranslateRequest {
        source_language: resolve_source_language(from, &config),
        target_language: resolve_target_language(to, &config)?,
        text: source_text,
        engine: engine.unwrap_or_default(),
    };

    let hub = build_hub(&config)?;
    if hub.is_empty() {
        bail!(
            "No translation engines configured\n\n\
             Add engines to {}:\n  \
             [hub]\n  \
             engines = [\"deepl\", \"google\"]",
            manager.config_path().display()
        );
    }

    if !request.engine.is_empty() {
        crate::status!("Engine: {}", request.engine);
    }

    let spinner = Spinner::new("Translating...");
    let response = hub.translate(&request).await;
    spinner.stop();

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if !response.error.is_empty() {
        bail!("translation failed:\n{}", response.error);
    }

    println!("{}", response.text);
    io::stdout().flush()?;

    Ok(())
}

fn resolve_source_language(from: Option<String>, config: &ConfigFile) -> String {
    from.or_else(|| config.hub.from.clone()).unwrap_or_default()
}

fn resolve_target_language(to: Option<String>, config: &ConfigFile) -> Result<String> {
    to.or_else(|| config.hub.to.clone()).ok_or_else(|| {
        anyhow::anyhow!(
            "Missing required configuration: 'to' (target language)\n\n\
             Please provide it via:\n  \
             - CLI option: thub --to <lang>\n  \
             - Config file: ~/.config/thub/config.toml ([hub] to = \"<lang>\")"
        )
    })
}
