//! Base trait for view state in MVI architecture.

/// Marker trait for view state objects.
///
/// States should be:
/// - Cloneable (views render from snapshots)
/// - Self-contained (all data needed to render the view)
/// - Comparable (PartialEq for detecting changes)
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
