// Library interface for antiraid-push - shared by the getsettings and push binaries
pub mod antiraid;
pub mod bundle;
pub mod cli;
pub mod config;
pub mod error;
