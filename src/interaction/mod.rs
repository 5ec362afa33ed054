//! Input handling: pointer gestures, wheel zoom, keyboard and file import routing.

/// Gesture state machine.
pub mod controller;
/// Transform handle geometry and box proposals.
pub mod handles;
/// Host input events and the actions returned for them.
pub mod input;
