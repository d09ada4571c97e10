pub mod client;
pub mod models;

pub use client::AntiRaidClient;
pub use models::{BuiltinsStatus, OperationKind, ScriptFields, SettingsOperation};
