/// Bytes to premultiplied rasters.
pub mod decode;
/// Background decode queue.
pub mod import;
