/// Canvas flatten to PNG.
pub mod png;
