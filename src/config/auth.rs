//! Authentication header building for API requests.

use super::credentials::{AuthType, CredentialStatus};
use super::types::ApiConfig;

/// Header name and value for authentication.
pub type AuthHeader = (String, String);

/// Build the authentication header for the API.
///
/// Returns `Some((header_name, header_value))` if auth is configured,
/// or `None` if no auth is needed or credentials are missing.
pub fn build_auth_header(api: &ApiConfig) -> Option<AuthHeader> {
    header_for(api.auth_type(), api.resolve_credential())
}

fn header_for(auth_type: AuthType, credential: CredentialStatus) -> Option<AuthHeader> {
    match (auth_type, credential) {
        (AuthType::ApiKey, CredentialStatus::Configured(key)) => {
            Some(("x-api-key".to_string(), key.expose().to_string()))
        }
        (AuthType::Bearer, CredentialStatus::Configured(key)) => Some((
            "Authorization".to_string(),
            format!("Bearer {}", key.expose()),
        )),
        (AuthType::None, _) => None,
        (_, CredentialStatus::Unconfigured { reason }) => {
            tracing::warn!(%reason, "API credential missing, sending unauthenticated requests");
            None
        }
        (_, CredentialStatus::NoAuth) => None,
    }
}
