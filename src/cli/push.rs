use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use tracing::{debug, info};

use super::init_logging;
use crate::antiraid::{AntiRaidClient, ScriptFields, SettingsOperation};
use crate::bundle::{collect_bundle, normalize_path, IgnoreSet};
use crate::config::{
    load_dotenv, load_manifest, push_credentials_from_env, resolve_api_url, PushCredentials,
    MANIFEST_FILE,
};
use crate::error::{AntiRaidError, Result};

/// Arguments for the `push` binary
#[derive(Debug)]
pub struct PushArgs {
    pub dir: PathBuf,
    pub config: Option<PathBuf>,
    pub api_url: Option<String>,
    pub dry_run: bool,
    pub no_bundled_types: bool,
    pub verbose: bool,
}

impl Default for PushArgs {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            config: None,
            api_url: None,
            dry_run: false,
            no_bundled_types: false,
            verbose: false,
        }
    }
}

#[derive(Debug)]
pub enum PushOutcome {
    Pushed(serde_json::Value),
    DryRun(SettingsOperation<ScriptFields>),
}

/// Run the push and map server-reported failures to exit status 1.
pub async fn run_push(args: PushArgs) -> anyhow::Result<ExitCode> {
    init_logging(args.verbose);
    load_dotenv();

    let credentials = push_credentials_from_env()?;
    let api_url = resolve_api_url(args.api_url.as_deref())?;

    match push_script(&args, &credentials, &api_url).await {
        Ok(PushOutcome::Pushed(body)) => {
            println!("Script pushed successfully with a resp of: {}", body);
            Ok(ExitCode::SUCCESS)
        }
        Ok(PushOutcome::DryRun(operation)) => {
            println!("{}", serde_json::to_string_pretty(&operation)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(AntiRaidError::Rejected { body, .. }) => {
            println!("Err: {}", body);
            Ok(ExitCode::FAILURE)
        }
        Err(AntiRaidError::Builtins(data)) => {
            println!("Error pushing script\n{}", detail_text(&data));
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Bundle `args.dir` and upsert it as the guild's script setting.
pub async fn push_script(
    args: &PushArgs,
    credentials: &PushCredentials,
    api_url: &str,
) -> Result<PushOutcome> {
    let manifest_path = args
        .config
        .clone()
        .unwrap_or_else(|| args.dir.join(MANIFEST_FILE));
    let manifest = load_manifest(&manifest_path, args.config.is_some())?;

    let use_bundled_types = manifest.bundle.use_bundled_types && !args.no_bundled_types;
    let ignore = IgnoreSet::for_bundle(&manifest.bundle, use_bundled_types);
    debug!("Ignoring {:?} ({:?} matching)", ignore.entries(), ignore.mode());

    let mut content = collect_bundle(&args.dir, &ignore)?;
    // The manifest itself is dropped by exact path only.
    if let Some(rel) = relative_to(&args.dir, &manifest_path) {
        content.remove(&normalize_path(&rel));
    }
    let fields = ScriptFields::new(
        &manifest.script,
        use_bundled_types,
        content,
        credentials.error_channel.clone(),
    );
    let operation = SettingsOperation::upsert_script(fields);

    if args.dry_run {
        info!("Dry run, not contacting {}", api_url);
        return Ok(PushOutcome::DryRun(operation));
    }

    println!("Pushing script to AntiRaid...");

    let client = AntiRaidClient::new(api_url, &credentials.credentials.api_token)?;
    let body = client
        .apply(&credentials.credentials.guild_id, &operation)
        .await?;

    Ok(PushOutcome::Pushed(body))
}

// String details print bare, anything else as JSON.
fn detail_text(data: &serde_json::Value) -> String {
    match data {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Path of `file` inside `dir`, if it exists there.
fn relative_to(dir: &Path, file: &Path) -> Option<String> {
    let dir = fs::canonicalize(dir).ok()?;
    let file = fs::canonicalize(file).ok()?;
    let rel = file.strip_prefix(&dir).ok()?;
    Some(rel.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::antiraid::models::BUNDLED_TYPES_CAP;
    use crate::config::Credentials;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use tempfile::TempDir;

    fn credentials() -> PushCredentials {
        PushCredentials {
            credentials: Credentials {
                api_token: "test-token".to_string(),
                guild_id: "42".to_string(),
            },
            error_channel: "777".to_string(),
        }
    }

    fn args_for(dir: &Path) -> PushArgs {
        PushArgs {
            dir: dir.to_path_buf(),
            ..PushArgs::default()
        }
    }

    fn dry_run_fields(args: PushArgs) -> ScriptFields {
        let rt = tokio::runtime::Runtime::new().unwrap();
        match rt.block_on(push_script(&args, &credentials(), "http://127.0.0.1:9")) {
            Ok(PushOutcome::DryRun(operation)) => operation.fields,
            other => panic!("Expected dry run, got {:?}", other),
        }
    }

    #[test]
    fn test_dry_run_builds_payload_without_network() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "hello").unwrap();
        fs::write(temp_dir.path().join("push.py"), "import requests").unwrap();

        let fields = dry_run_fields(PushArgs {
            dry_run: true,
            ..args_for(temp_dir.path())
        });

        assert_eq!(fields.content.len(), 1);
        assert_eq!(fields.content["a.txt"], "hello");
        assert_eq!(fields.error_channel, "777");
        assert!(fields.allowed_caps.contains(&BUNDLED_TYPES_CAP.to_string()));
    }

    #[test]
    fn test_manifest_is_applied_and_not_bundled() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("init.luau"), "return {}").unwrap();
        fs::write(
            temp_dir.path().join("antiraid.toml"),
            r#"
            [script]
            name = "automod"
            events = ["MESSAGE"]

            [bundle]
            use_bundled_types = false
        "#,
        )
        .unwrap();

        let fields = dry_run_fields(PushArgs {
            dry_run: true,
            ..args_for(temp_dir.path())
        });

        assert_eq!(fields.name, "automod");
        assert_eq!(fields.events, vec!["MESSAGE".to_string()]);
        assert_eq!(fields.allowed_caps, vec!["*".to_string()]);
        assert!(!fields.content.contains_key("antiraid.toml"));
        assert!(fields.content.contains_key("init.luau"));
    }

    #[test]
    fn test_manifest_exclusion_is_exact() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("antiraid.toml"), "[script]\nname = \"automod\"\n").unwrap();
        fs::write(temp_dir.path().join("antiraid.toml.example"), "[script]\n").unwrap();

        let fields = dry_run_fields(PushArgs {
            dry_run: true,
            ..args_for(temp_dir.path())
        });

        assert!(!fields.content.contains_key("antiraid.toml"));
        assert_eq!(fields.content["antiraid.toml.example"], "[script]\n");
    }

    #[test]
    fn test_detail_text_strips_string_quotes() {
        assert_eq!(detail_text(&json!("invalid capability")), "invalid capability");
        assert_eq!(detail_text(&json!({"field": "events"})), r#"{"field":"events"}"#);
        assert_eq!(detail_text(&serde_json::Value::Null), "null");
    }

    #[test]
    fn test_no_bundled_types_flag_overrides_manifest() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("templating-types")).unwrap();
        fs::write(temp_dir.path().join("templating-types/discord.luau"), "--types").unwrap();

        let fields = dry_run_fields(PushArgs {
            dry_run: true,
            no_bundled_types: true,
            ..args_for(temp_dir.path())
        });

        assert!(fields.content.contains_key("templating-types/discord.luau"));
        assert!(!fields.allowed_caps.contains(&BUNDLED_TYPES_CAP.to_string()));
    }

    #[test]
    fn test_explicit_missing_manifest_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let args = PushArgs {
            config: Some(temp_dir.path().join("nope.toml")),
            dry_run: true,
            ..args_for(temp_dir.path())
        };

        let rt = tokio::runtime::Runtime::new().unwrap();
        let result = rt.block_on(push_script(&args, &credentials(), "http://127.0.0.1:9"));
        assert!(matches!(result, Err(AntiRaidError::Config(_))));
    }

    #[tokio::test]
    async fn test_push_script_uploads_bundle() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "hello").unwrap();
        fs::create_dir_all(temp_dir.path().join(".git")).unwrap();
        fs::write(temp_dir.path().join(".git/config"), "[core]").unwrap();

        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/guilds/42/settings")
            .match_header("authorization", "test-token")
            .match_body(Matcher::PartialJson(json!({
                "fields": {"content": {"a.txt": "hello"}, "error_channel": "777"},
                "operation": "CreateOrUpdate",
                "setting": "scripts"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"$builtins": {"type": "Ok"}}"#)
            .create_async()
            .await;

        let result = push_script(&args_for(temp_dir.path()), &credentials(), &server.url()).await;

        mock.assert_async().await;
        match result {
            Ok(PushOutcome::Pushed(body)) => assert_eq!(body["$builtins"]["type"], "Ok"),
            other => panic!("Expected Pushed, got {:?}", other),
        }
    }
}
