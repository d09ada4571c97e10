use super::models::{BuiltinsStatus, SettingsOperation};
use crate::error::{AntiRaidError, Result};
use reqwest::{header, Client, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Clone)]
pub struct AntiRaidClient {
    client: Client,
    base_url: String,
}

impl AntiRaidClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(token)
                .map_err(|e| AntiRaidError::Config(format!("Invalid token format: {}", e)))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn settings_url(&self, guild_id: &str) -> String {
        format!("{}/guilds/{}/settings", self.base_url, guild_id)
    }

    /// Fetch every setting of a guild. The body is returned as-is, whatever the status.
    pub async fn get_settings(&self, guild_id: &str) -> Result<serde_json::Value> {
        let url = self.settings_url(guild_id);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        if response.status() != StatusCode::OK {
            warn!("Settings request returned {}", response.status());
        }

        Ok(response.json().await?)
    }

    /// Run a settings operation and check both the HTTP status and `$builtins.type`.
    pub async fn apply<T>(
        &self,
        guild_id: &str,
        operation: &SettingsOperation<T>,
    ) -> Result<serde_json::Value>
    where
        T: Serialize,
    {
        let url = self.settings_url(guild_id);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(operation).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await?;
            return Err(AntiRaidError::Rejected { status, body });
        }

        let body: serde_json::Value = response.json().await?;
        let builtins = body.get("$builtins").cloned().ok_or_else(|| {
            AntiRaidError::MalformedResponse("response has no $builtins field".to_string())
        })?;
        let builtins: BuiltinsStatus = serde_json::from_value(builtins)?;

        if !builtins.is_ok() {
            return Err(AntiRaidError::Builtins(builtins.data));
        }

        Ok(body)
    }
}
