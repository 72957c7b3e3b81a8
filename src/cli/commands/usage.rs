use anyhow::Result;

use crate::config::{ConfigManager, build_hub};
use crate::ui::{Spinner, Style};

/// Prints the usage/quota report for every configured engine.
pub async fn run_usage(json: bool) -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default();
    let hub = build_hub(&config)?;

    if hub.is_empty() {
        println!("No engines configured.");
        println!("Add engines to {}", manager.config_path().display());
        return Ok(());
    }

    let spinner = Spinner::new("Fetching usage...");
    let report = hub.usage().await;
    spinner.stop();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", Style::header("Engine usage"));
    for entry in &report.usage {
        if entry.message.is_empty() {
            println!(
                "  {:10} {} {} / {} ({})",
                Style::value(&entry.engine),
                Style::label("characters:"),
                entry.count,
                entry.limit,
                entry.percent
            );
        } else {
            println!(
                "  {:10} {}",
                Style::value(&entry.engine),
                Style::warning(&entry.message)
            );
        }
    }

    Ok(())
}
