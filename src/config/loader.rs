use super::settings::{
    Credentials, Manifest, PushCredentials, API_URL_VAR, DEFAULT_API_URL,
};
use crate::error::{AntiRaidError, Result};
use std::path::Path;
use tracing::{debug, warn};
use url::Url;

/// Load `.env` from the working directory or an ancestor. Variables already set win.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Ignoring unreadable .env file: {}", e),
    }
}

pub fn credentials_from_env() -> Result<Credentials> {
    Credentials::from_lookup(|key| std::env::var(key).ok())
}

pub fn push_credentials_from_env() -> Result<PushCredentials> {
    PushCredentials::from_lookup(|key| std::env::var(key).ok())
}

/// Pick the API base URL: flag, then `API_URL`, then the staging default.
pub fn resolve_api_url(flag: Option<&str>) -> Result<String> {
    let raw = match flag {
        Some(url) => url.to_string(),
        None => std::env::var(API_URL_VAR)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
    };

    validate_api_url(&raw)
}

pub fn validate_api_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw)?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AntiRaidError::Config(format!(
            "API URL must use http or https, got {}",
            url.scheme()
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Read the script manifest. A missing file yields the defaults unless `required`.
pub fn load_manifest(path: &Path, required: bool) -> Result<Manifest> {
    if !path.exists() {
        if required {
            return Err(AntiRaidError::Config(format!(
                "Manifest not found at {:?}",
                path
            )));
        }
        debug!("No manifest at {:?}, using defaults", path);
        return Ok(Manifest::default());
    }

    let content = std::fs::read_to_string(path)?;
    let manifest: Manifest = toml::from_str(&content)?;

    manifest
        .validate()
        .map_err(|e| AntiRaidError::Config(e.to_string()))?;
    Ok(manifest)
}
