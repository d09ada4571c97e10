use crate::bundle::Bundle;
use crate::config::settings::ScriptConfig;
use serde::{Deserialize, Serialize};

pub const SCRIPT_LANGUAGE: &str = "luau";
pub const SCRIPTS_SETTING: &str = "scripts";
pub const BUNDLED_TYPES_CAP: &str = "assetmanager:use_bundled_templating_types";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum OperationKind {
    CreateOrUpdate,
}

/// Envelope the settings endpoint expects for every write.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingsOperation<T> {
    pub fields: T,
    pub operation: OperationKind,
    pub setting: String,
}

impl SettingsOperation<ScriptFields> {
    pub fn upsert_script(fields: ScriptFields) -> Self {
        Self {
            fields,
            operation: OperationKind::CreateOrUpdate,
            setting: SCRIPTS_SETTING.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScriptFields {
    pub name: String,
    pub language: String,
    pub paused: bool,
    pub allowed_caps: Vec<String>,
    pub events: Vec<String>,
    pub content: Bundle,
    pub error_channel: String,
}

impl ScriptFields {
    pub fn new(
        script: &ScriptConfig,
        use_bundled_types: bool,
        content: Bundle,
        error_channel: String,
    ) -> Self {
        Self {
            name: script.name.clone(),
            language: SCRIPT_LANGUAGE.to_string(),
            paused: script.paused,
            allowed_caps: allowed_caps(&script.allowed_caps, use_bundled_types),
            events: script.events.clone(),
            content,
            error_channel,
        }
    }
}

pub fn allowed_caps(configured: &[String], use_bundled_types: bool) -> Vec<String> {
    let mut caps = configured.to_vec();
    if use_bundled_types && !caps.iter().any(|c| c == BUNDLED_TYPES_CAP) {
        caps.push(BUNDLED_TYPES_CAP.to_string());
    }
    caps
}

/// The `$builtins` status block of a settings response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuiltinsStatus {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl BuiltinsStatus {
    pub fn is_ok(&self) -> bool {
        self.kind == "Ok"
    }
}
