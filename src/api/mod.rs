//! REST API access: HTTP client, page requests, and the page-source seam.

mod client;
mod error;
mod page;
mod source;

pub use client::{ApiClient, TimeoutConfig};
pub use error::{extract_server_message, TransportError, GENERIC_ERROR_MESSAGE};
pub use page::{Filters, PageRequest, PageResult, SortDirection, RESERVED_KEYS};
pub use source::{HttpPageSource, PageSource};
