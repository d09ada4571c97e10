use crate::bundle::MatchMode;
use crate::error::{AntiRaidError, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://splashtail-staging.antiraid.xyz";
pub const MANIFEST_FILE: &str = "antiraid.toml";

pub const API_TOKEN_VAR: &str = "API_TOKEN";
pub const GUILD_ID_VAR: &str = "GUILD_ID";
pub const ERROR_CHANNEL_VAR: &str = "ERROR_CHANNEL";
pub const API_URL_VAR: &str = "API_URL";

/// Token and guild, the two values every request needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_token: String,
    pub guild_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushCredentials {
    pub credentials: Credentials,
    pub error_channel: String,
}

impl Credentials {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            api_token: require(&lookup, API_TOKEN_VAR)?,
            guild_id: require(&lookup, GUILD_ID_VAR)?,
        })
    }
}

impl PushCredentials {
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::from_lookup(&lookup)?;
        let error_channel = require(&lookup, ERROR_CHANNEL_VAR)?;

        Ok(Self {
            credentials,
            error_channel,
        })
    }
}

// Empty counts as unset.
fn require<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(AntiRaidError::Config(format!(
            "{} is not set in the environment variables",
            key
        ))),
    }
}

/// Contents of `antiraid.toml`. Every field falls back to the stock script setup.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(default)]
    pub script: ScriptConfig,
    #[serde(default)]
    pub bundle: BundleConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScriptConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub paused: bool,
    #[serde(default = "default_allowed_caps")]
    pub allowed_caps: Vec<String>,
    #[serde(default = "default_events")]
    pub events: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BundleConfig {
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
    #[serde(default = "default_use_bundled_types")]
    pub use_bundled_types: bool,
    #[serde(default)]
    pub matching: MatchMode,
}

// Default functions
fn default_name() -> String {
    "builtins-dev".to_string()
}

fn default_allowed_caps() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_events() -> Vec<String> {
    [
        "MESSAGE",
        "INTERACTION_CREATE",
        "KeyExpiry[builtins.remindme]",
        "GetSettings",
        "ExecuteSetting[guildmembers-rod]",
        "ExecuteSetting[guildroles-rod]",
        "ExecuteSetting[scripts]",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_ignore() -> Vec<String> {
    [
        ".env",
        ".env.sample",
        ".git",
        ".gitignore",
        ".gitmodules",
        "README.md",
        "push.py",
        "requirements.txt",
        "LICENSE",
        ".darklua.json5",
        ".venv",
        ".net",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_use_bundled_types() -> bool {
    true
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            paused: false,
            allowed_caps: default_allowed_caps(),
            events: default_events(),
        }
    }
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            ignore: default_ignore(),
            use_bundled_types: default_use_bundled_types(),
            matching: MatchMode::default(),
        }
    }
}

impl Manifest {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.script.name.trim().is_empty() {
            anyhow::bail!("Script name cannot be empty");
        }
        Ok(())
    }
}
