use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::scene::model::Raster;

/// Largest raster edge accepted on import.
pub const MAX_RASTER_EDGE: u32 = 16_384;

/// Decode raw file bytes into a premultiplied raster.
///
/// Bitmap formats go through `image`; SVG documents are rasterized at their intrinsic size.
pub fn decode_image(bytes: &[u8]) -> CanvasResult<Raster> {
    if bytes.is_empty() {
        return Err(CanvasError::decode("empty file"));
    }
    if image::guess_format(bytes).is_err() && looks_like_svg(bytes) {
        return rasterize_svg(bytes);
    }

    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| CanvasError::decode(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    check_dimensions(width, height)?;

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(Raster {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(1024)];
    let head = String::from_utf8_lossy(head);
    head.contains("<svg")
}

fn rasterize_svg(bytes: &[u8]) -> CanvasResult<Raster> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts)
        .context("parse svg tree")
        .map_err(|e| CanvasError::decode(format!("{e:#}")))?;

    let size = tree.size();
    let (w, h) = (size.width(), size.height());
    if !w.is_finite() || !h.is_finite() || w <= 0.0 || h <= 0.0 {
        return Err(CanvasError::decode("svg has invalid width/height"));
    }
    let width = (w.ceil() as u32).max(1);
    let height = (h.ceil() as u32).max(1);
    check_dimensions(width, height)?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| CanvasError::decode("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(width as f32 / w, height as f32 / h);
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(Raster {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}

fn check_dimensions(width: u32, height: u32) -> CanvasResult<()> {
    if width == 0 || height == 0 {
        return Err(CanvasError::decode("image has no pixels"));
    }
    if width > MAX_RASTER_EDGE || height > MAX_RASTER_EDGE {
        return Err(CanvasError::decode(format!(
            "image too large: {width}x{height} (max {MAX_RASTER_EDGE}x{MAX_RASTER_EDGE})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
