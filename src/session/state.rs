//! Session context shared by every list in one signed-in session.
//!
//! Holds the API client plus cached account data. Nothing here is
//! global: callers get a `SessionContext` at construction and refresh or
//! invalidate it explicitly.

use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;

use crate::api::{ApiClient, HttpPageSource, TransportError};
use crate::config::{Config, ListConfig};
use crate::list::{ListOptions, PagedListController};
use crate::records::{Category, CurrentUser, Resource, ResourceKind};

/// Endpoint for the signed-in account.
pub const CURRENT_USER_PATH: &str = "/me";
/// Endpoint for forum categories.
pub const CATEGORIES_PATH: &str = "/forum/categories";

/// Errors that can occur during session operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A request made on behalf of the session failed.
    Transport(TransportError),
    /// Cached data was read before the first successful refresh.
    NotLoaded { what: &'static str },
    /// No list with this name is configured.
    UnknownList { name: String },
    /// The list exists but returns a different record type.
    ResourceMismatch {
        list: String,
        configured: ResourceKind,
        requested: ResourceKind,
    },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Transport(err) => write!(f, "Session request failed: {}", err),
            SessionError::NotLoaded { what } => {
                write!(f, "{} not loaded; refresh the session first", what)
            }
            SessionError::UnknownList { name } => write!(f, "List '{}' not configured", name),
            SessionError::ResourceMismatch {
                list,
                configured,
                requested,
            } => write!(
                f,
                "List '{}' returns {} records, not {}",
                list, configured, requested
            ),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for SessionError {
    fn from(err: TransportError) -> Self {
        SessionError::Transport(err)
    }
}

/// Cloneable handle to one session's client and cached account data.
#[derive(Clone)]
pub struct SessionContext {
    client: ApiClient,
    inner: Arc<RwLock<SessionInner>>,
}

struct SessionInner {
    config: Config,
    user: Option<CurrentUser>,
    categories: Option<Vec<Category>>,
    refreshed_at: Option<SystemTime>,
}

impl SessionContext {
    /// Build a session from configuration. Nothing is fetched yet.
    pub fn from_config(config: Config) -> Result<Self, SessionError> {
        let client = ApiClient::from_config(&config)?;
        Ok(Self {
            client,
            inner: Arc::new(RwLock::new(SessionInner {
                config,
                user: None,
                categories: None,
                refreshed_at: None,
            })),
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn config(&self) -> Config {
        self.inner.read().config.clone()
    }

    /// Fetch the current user, then categories, and replace the cache.
    ///
    /// The cache is only replaced when both requests succeed.
    pub async fn refresh(&self) -> Result<(), SessionError> {
        let user: CurrentUser = self.client.get_json(CURRENT_USER_PATH, &[]).await?;
        let categories: Vec<Category> = self.client.get_json(CATEGORIES_PATH, &[]).await?;

        let mut inner = self.inner.write();
        tracing::info!(
            user = %user.id,
            categories = categories.len(),
            "Session refreshed"
        );
        inner.user = Some(user);
        inner.categories = Some(categories);
        inner.refreshed_at = Some(SystemTime::now());
        Ok(())
    }

    /// Drop cached account data, e.g. after sign-out or a profile edit.
    pub fn invalidate(&self) {
        let mut inner = self.inner.write();
        inner.user = None;
        inner.categories = None;
        inner.refreshed_at = None;
        tracing::debug!("Session invalidated");
    }

    pub fn is_loaded(&self) -> bool {
        self.inner.read().refreshed_at.is_some()
    }

    pub fn refreshed_at(&self) -> Option<SystemTime> {
        self.inner.read().refreshed_at
    }

    pub fn current_user(&self) -> Result<CurrentUser, SessionError> {
        self.inner
            .read()
            .user
            .clone()
            .ok_or(SessionError::NotLoaded { what: "current user" })
    }

    pub fn categories(&self) -> Result<Vec<Category>, SessionError> {
        self.inner
            .read()
            .categories
            .clone()
            .ok_or(SessionError::NotLoaded { what: "categories" })
    }

    /// Build a controller for the configured list `name`.
    ///
    /// Fails if the list is unknown or returns a record type other than `T`.
    pub fn list<T: Resource>(
        &self,
        name: &str,
    ) -> Result<PagedListController<HttpPageSource<T>>, SessionError> {
        let list = {
            let inner = self.inner.read();
            inner
                .config
                .list(name)
                .cloned()
                .ok_or_else(|| SessionError::UnknownList {
                    name: name.to_string(),
                })?
        };
        self.list_for(&list)
    }

    /// Build a controller for an explicit list definition.
    pub fn list_for<T: Resource>(
        &self,
        list: &ListConfig,
    ) -> Result<PagedListController<HttpPageSource<T>>, SessionError> {
        if list.resource != T::KIND {
            return Err(SessionError::ResourceMismatch {
                list: list.name.clone(),
                configured: list.resource,
                requested: T::KIND,
            });
        }
        let options = ListOptions::from_config(list, &self.inner.read().config.defaults);
        let source = HttpPageSource::new(self.client.clone(), list.path.clone());
        Ok(PagedListController::new(source, options))
    }
}
