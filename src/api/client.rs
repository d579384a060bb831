//! Shared HTTP client for the REST API.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::api::error::{extract_server_message, TransportError};
use crate::config::{build_auth_header, AuthHeader, Config};

/// Timeouts and pool settings for the HTTP client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub request: Duration,
    pub connect: Duration,
    pub pool_idle: Duration,
    pub pool_max_idle_per_host: usize,
}

impl From<&crate::config::Defaults> for TimeoutConfig {
    fn from(defaults: &crate::config::Defaults) -> Self {
        Self {
            request: Duration::from_secs(defaults.timeout_seconds as u64),
            connect: Duration::from_secs(defaults.connect_timeout_seconds as u64),
            pool_idle: Duration::from_secs(defaults.pool_idle_timeout_seconds as u64),
            pool_max_idle_per_host: defaults.pool_max_idle_per_host as usize,
        }
    }
}

/// Cheaply cloneable REST client bound to one API base URL.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    auth: Option<AuthHeader>,
    timeouts: TimeoutConfig,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.auth.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let base_url = Url::parse(&config.api.base_url)
            .map_err(|e| TransportError::InvalidRequest(format!("bad base URL: {e}")))?;
        let timeouts = TimeoutConfig::from(&config.defaults);

        let client = Client::builder()
            .timeout(timeouts.request)
            .connect_timeout(timeouts.connect)
            .pool_idle_timeout(timeouts.pool_idle)
            .pool_max_idle_per_host(timeouts.pool_max_idle_per_host)
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("failed to build client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            auth: build_auth_header(&config.api),
            timeouts,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` against the base URL, keeping the base's own path.
    ///
    /// `https://host/api` + `/posts` gives `https://host/api/posts`.
    pub fn endpoint(&self, path: &str, query: &[(String, String)]) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        url
    }

    /// GET `path` and decode the JSON body as `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T, TransportError> {
        let url = self.endpoint(path, query);
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, method = "GET", url = %url, "Issuing request");

        let mut builder = self.client.get(url.clone());
        if let Some((name, value)) = &self.auth {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let timeout_secs = self.timeouts.request.as_secs();
        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout_secs))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::from_reqwest(e, timeout_secs))?;

        if !status.is_success() {
            let err = TransportError::Status {
                status: status.as_u16(),
                message: extract_server_message(&body),
            };
            tracing::warn!(%request_id, status = status.as_u16(), url = %url, "Request failed");
            return Err(err);
        }

        tracing::debug!(%request_id, status = status.as_u16(), bytes = body.len(), "Response received");
        serde_json::from_slice(&body).map_err(|e| TransportError::Malformed(e.to_string()))
    }
}
