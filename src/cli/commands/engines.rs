use anyhow::Result;

use crate::config::ConfigManager;
use crate::ui::Style;

/// Prints the configured engines in fallback priority order.
pub fn print_engines() -> Result<()> {
    let manager = ConfigManager::new()?;
    let config = manager.load_or_default();

    if config.hub.engines.is_empty() {
        println!("No engines configured.");
        println!("Add engines to {}", manager.config_path().display());
        return Ok(());
    }

    println!("{}", Style::header("Configured engines (fallback order):"));
    for (position, name) in config.hub.engines.iter().enumerate() {
        let credential = config
            .engines
            .get(name)
            .map_or("(missing [engines] section)", |engine| {
                engine.credential_source()
            });

        println!(
            "  {}. {} {}",
            position + 1,
            Style::value(name),
            Style::secondary(format!("({credential})"))
        );
    }

    Ok(())
}
