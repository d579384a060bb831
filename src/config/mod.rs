//! Configuration: TOML file and credentials.

mod auth;
mod credentials;
mod loader;
mod types;

pub use auth::{build_auth_header, AuthHeader};
pub use credentials::{AuthType, CredentialStatus, SecureString, API_KEY_ENV};
pub use loader::ConfigError;
pub use types::{ApiConfig, Config, Defaults, ListConfig};
