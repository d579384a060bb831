//! Credential resolution from configuration.
//!
//! The API key is read from the config at request-client build time and
//! wrapped so it never reaches logs.

use super::types::ApiConfig;

/// Environment variable that overrides `api.api_key`.
pub const API_KEY_ENV: &str = "CARELIST_API_KEY";

/// Authentication type for API requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// `x-api-key` header.
    ApiKey,
    /// Standard `Authorization: Bearer` header.
    Bearer,
    /// No authentication required.
    None,
}

impl AuthType {
    /// Parse auth type from string.
    /// Defaults to `Bearer` for unknown values.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "api_key" => AuthType::ApiKey,
            "none" => AuthType::None,
            _ => AuthType::Bearer,
        }
    }
}

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when needed for API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Expose the inner value.
    ///
    /// Use sparingly and only when actually sending to APIs.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Status of credential resolution for the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    /// Key resolved successfully.
    Configured(SecureString),
    /// Key is missing or empty.
    Unconfigured { reason: String },
    /// No authentication required.
    NoAuth,
}

impl ApiConfig {
    /// Parse the auth_type field to AuthType enum.
    pub fn auth_type(&self) -> AuthType {
        AuthType::parse(&self.auth_type_str)
    }

    /// Resolve the credential, preferring `CARELIST_API_KEY` over the file.
    pub fn resolve_credential(&self) -> CredentialStatus {
        self.resolve_with_env(std::env::var(API_KEY_ENV).ok())
    }

    fn resolve_with_env(&self, env_key: Option<String>) -> CredentialStatus {
        if self.auth_type() == AuthType::None {
            return CredentialStatus::NoAuth;
        }

        match env_key.or_else(|| self.api_key.clone()) {
            Some(key) if !key.is_empty() => CredentialStatus::Configured(SecureString::new(key)),
            Some(_) => CredentialStatus::Unconfigured {
                reason: "api_key is empty".to_string(),
            },
            None => CredentialStatus::Unconfigured {
                reason: format!("api_key not set and {API_KEY_ENV} not in environment"),
            },
        }
    }
}
