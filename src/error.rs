use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AntiRaidError {
    #[error("AntiRaid API error: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with something other than 200.
    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    /// 200 response whose `$builtins.type` is not `Ok`.
    #[error("Error pushing script\n{0}")]
    Builtins(serde_json::Value),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

pub type Result<T> = std::result::Result<T, AntiRaidError>;
