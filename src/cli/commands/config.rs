//! Show the effective configuration

use assetcheck::config::AppConfig;
use assetcheck::output::OutputMode;

/// Print the loaded configuration
pub fn show_config(config: &AppConfig, mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Human => print!("{}", config.to_toml()?),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}
