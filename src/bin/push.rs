//! Bundle the current directory and upload it as an AntiRaid script.
//!
//! Reads `API_TOKEN`, `GUILD_ID` and `ERROR_CHANNEL` from the environment (or `.env`).
//! Script metadata and ignore rules come from `antiraid.toml` when present.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use antiraid_push::cli::push::{run_push, PushArgs};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(name = "push")]
struct Cli {
    /// Directory to bundle
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    dir: PathBuf,

    /// Script manifest (defaults to <dir>/antiraid.toml)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Base URL of the AntiRaid API (overrides API_URL)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Print the payload instead of uploading it
    #[arg(long)]
    dry_run: bool,

    /// Upload local templating types instead of using the bundled ones
    #[arg(long)]
    no_bundled_types: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    run_push(PushArgs {
        dir: cli.dir,
        config: cli.config,
        api_url: cli.api_url,
        dry_run: cli.dry_run,
        no_bundled_types: cli.no_bundled_types,
        verbose: cli.verbose,
    })
    .await
}
