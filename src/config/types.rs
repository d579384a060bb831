use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::api::SortDirection;
use crate::records::ResourceKind;

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
    #[serde(default)]
    pub api: ApiConfig,
    /// Replaces the built-in lists entirely when present.
    #[serde(default = "default_lists")]
    pub lists: Vec<ListConfig>,
}

/// Default settings for the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defaults {
    /// Page size for lists that do not set their own (default: 10).
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Pool idle timeout in seconds (default: 90).
    #[serde(default = "default_pool_idle_timeout")]
    pub pool_idle_timeout_seconds: u32,
    /// Max idle connections per host (default: 8).
    #[serde(default = "default_pool_max_idle_per_host")]
    pub pool_max_idle_per_host: u32,
}

/// Where the REST API lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL for the API (e.g., "https://api.example.com").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Authentication type: "bearer", "api_key", "none".
    #[serde(rename = "auth_type", default = "default_auth_type")]
    pub auth_type_str: String,
    /// Token or key sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// One server-paginated list the client knows how to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    /// Unique name used on the command line (e.g., "forum-posts").
    pub name: String,
    /// Record type the endpoint returns.
    pub resource: ResourceKind,
    /// Endpoint path relative to the API base URL.
    pub path: String,
    /// Overrides `defaults.page_size`.
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default)]
    pub order_by: Option<String>,
    #[serde(default)]
    pub order_direction: Option<SortDirection>,
    /// Filters always sent with this list, merged under any per-load filters.
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl ListConfig {
    pub fn effective_page_size(&self, defaults: &Defaults) -> u32 {
        self.page_size.unwrap_or(defaults.page_size)
    }
}

fn default_page_size() -> u32 {
    10
}

fn default_timeout() -> u32 {
    30
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_pool_idle_timeout() -> u32 {
    90
}

fn default_pool_max_idle_per_host() -> u32 {
    8
}

fn default_base_url() -> String {
    "http://127.0.0.1:3000/api".to_string()
}

fn default_auth_type() -> String {
    "bearer".to_string()
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            pool_idle_timeout_seconds: default_pool_idle_timeout(),
            pool_max_idle_per_host: default_pool_max_idle_per_host(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            auth_type_str: default_auth_type(),
            api_key: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            defaults: Defaults::default(),
            api: ApiConfig::default(),
            lists: default_lists(),
        }
    }
}

fn default_lists() -> Vec<ListConfig> {
    let list = |name: &str, resource, path: &str, order_by: Option<&str>| ListConfig {
        name: name.to_string(),
        resource,
        path: path.to_string(),
        page_size: None,
        order_by: order_by.map(str::to_string),
        order_direction: order_by.map(|_| SortDirection::Desc),
        filters: BTreeMap::new(),
    };

    vec![
        list("forum-posts", ResourceKind::Post, "/forum/posts", Some("createdAt")),
        list(
            "appointments",
            ResourceKind::Appointment,
            "/appointments",
            Some("startsAt"),
        ),
        list("practitioners", ResourceKind::Practitioner, "/practitioners", None),
        list("bookmarks", ResourceKind::Bookmark, "/bookmarks", Some("createdAt")),
        list("care-team", ResourceKind::CareTeam, "/care-team", None),
    ]
}
