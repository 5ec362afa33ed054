//! Placed images and the store that owns them.

/// Image and patch types.
pub mod model;
/// Ordered image collection with single selection.
pub mod store;
