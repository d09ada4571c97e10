use anyhow::Result;
use tracing::debug;

use super::init_logging;
use crate::antiraid::AntiRaidClient;
use crate::config::{credentials_from_env, load_dotenv, resolve_api_url};

#[derive(Debug, Default)]
pub struct GetSettingsArgs {
    pub api_url: Option<String>,
    pub verbose: bool,
}

/// Print the guild's current settings as JSON.
pub async fn run_get_settings(args: GetSettingsArgs) -> Result<()> {
    init_logging(args.verbose);
    load_dotenv();

    let credentials = credentials_from_env()?;
    let api_url = resolve_api_url(args.api_url.as_deref())?;
    debug!("Fetching settings for guild {} from {}", credentials.guild_id, api_url);

    let client = AntiRaidClient::new(&api_url, &credentials.api_token)?;
    let settings = client.get_settings(&credentials.guild_id).await?;

    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
