//! Print a guild's AntiRaid settings.
//!
//! Reads `API_TOKEN` and `GUILD_ID` from the environment (or `.env`).

use clap::Parser;

use antiraid_push::cli::get_settings::{run_get_settings, GetSettingsArgs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "getsettings")]
struct Cli {
    /// Base URL of the AntiRaid API (overrides API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    run_get_settings(GetSettingsArgs {
        api_url: cli.api_url,
        verbose: cli.verbose,
    })
    .await
}
