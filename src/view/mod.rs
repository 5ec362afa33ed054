/// Scene/screen mapping with anchored zoom.
pub mod viewport;
