//! CLI parser and config loading.

use clap::Parser;

use crate::config::{BotConfig, ConfigOverrides};
use crate::core::Result;

#[derive(Debug, Parser)]
#[command(name = "relay-bot")]
#[command(about = "Telegram bot that stores chat messages and replays them on command", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Bot token; overrides TELEGRAM_BOT_TOKEN / BOT_TOKEN.
    #[arg(short, long)]
    pub token: Option<String>,

    /// Database file path or sqlite: URL; overrides DATABASE_URL.
    #[arg(short, long)]
    pub database: Option<String>,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            token: self.token.clone(),
            database_url: self.database.clone(),
        }
    }
}

/// Loads [`BotConfig`] from the environment, applying the CLI overrides.
pub fn load_config(cli: &Cli) -> Result<BotConfig> {
    let config = BotConfig::load(cli.overrides())?;
    config.validate()?;
    Ok(config)
}
