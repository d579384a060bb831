//! Base trait for intents (user/system actions) in MVI architecture.

/// Marker trait for intent objects.
///
/// Intents represent:
/// - User actions ("load more" pressed, filter changed)
/// - System events (a page arrived, a request failed)
pub trait Intent: Send + 'static {}
