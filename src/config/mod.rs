pub mod loader;
pub mod settings;

pub use loader::{
    credentials_from_env, load_dotenv, load_manifest, push_credentials_from_env, resolve_api_url,
};
pub use settings::{Credentials, Manifest, PushCredentials, MANIFEST_FILE};
