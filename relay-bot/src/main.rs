//! Binary for the relay bot.

use anyhow::Result;
use clap::Parser;
use relay_bot::{load_config, run_bot, Cli};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    run_bot(config).await?;
    Ok(())
}
