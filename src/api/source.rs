//! The fetch-page boundary between list controllers and the server.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;

use crate::api::client::ApiClient;
use crate::api::error::TransportError;
use crate::api::page::{PageRequest, PageResult};
use crate::records::Resource;

/// Anything that can return one page of a server-paginated collection.
///
/// Implementations are stateless from the caller's point of view: the
/// same request may be issued again after a failure.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> Result<PageResult<Self::Item>, TransportError>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Arc<S> {
    type Item = S::Item;

    async fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> Result<PageResult<Self::Item>, TransportError> {
        (**self).fetch_page(request).await
    }
}

/// [`PageSource`] backed by a REST endpoint returning
/// `{"items": [..], "total": n}` (or `rows` / `count`).
pub struct HttpPageSource<T> {
    client: ApiClient,
    path: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> HttpPageSource<T> {
    pub fn new(client: ApiClient, path: impl Into<String>) -> Self {
        Self {
            client,
            path: path.into(),
            _record: PhantomData,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

#[async_trait]
impl<T: Resource> PageSource for HttpPageSource<T> {
    type Item = T;

    async fn fetch_page(&self, request: &PageRequest) -> Result<PageResult<T>, TransportError> {
        let page: PageResult<T> = self
            .client
            .get_json(&self.path, &request.query_pairs())
            .await?;

        // A page is applied whole or not at all, so one bad record fails it.
        for item in &page.items {
            item.validate()
                .map_err(|e| TransportError::Malformed(e.to_string()))?;
        }

        tracing::debug!(
            resource = %T::KIND,
            path = %self.path,
            offset = request.offset,
            received = page.items.len(),
            total = page.total,
            "Page fetched"
        );
        Ok(page)
    }
}
