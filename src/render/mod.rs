//! Painting the scene into RGBA frames (CPU-first).

/// Renderer trait and frame type.
pub mod backend;
/// `vello_cpu` renderer.
pub mod cpu;
