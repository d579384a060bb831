//! Client-side list layer for the care marketplace API.
//!
//! The core is [`list::PagedListController`]: it loads a server-paginated
//! collection page by page, merges pages without duplicate records, and
//! ignores responses that a newer load has superseded.

pub mod api;
pub mod config;
pub mod list;
pub mod logging;
pub mod mvi;
pub mod records;
pub mod session;
