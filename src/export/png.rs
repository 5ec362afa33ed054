use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Canvas;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;
use crate::render::backend::{FrameRGBA, RenderRequest, Renderer};
use crate::scene::model::PlacedImage;
use crate::view::viewport::Viewport;

/// An encoded PNG ready to hand to the host as a download.
#[derive(Clone, Debug)]
pub struct ExportArtifact {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Write the PNG into `dir` under [`ExportArtifact::file_name`], creating `dir` if needed.
    pub fn save_in(&self, dir: &Path) -> CanvasResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create export dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("write png '{}'", path.display()))?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "saved export");
        Ok(path)
    }
}

/// What to flatten: the scene as the user currently sees it.
#[derive(Clone, Copy, Debug)]
pub struct ExportRequest<'a> {
    pub images: &'a [PlacedImage],
    pub viewport: Viewport,
    pub canvas: Canvas,
    pub background_rgba: [u8; 4],
    pub file_name: &'a str,
}

/// Flatten the visible canvas into a PNG.
///
/// The image covers exactly the canvas at its current zoom and pan. Selection chrome is never
/// part of the output.
#[tracing::instrument(
    skip(renderer, req),
    fields(images = req.images.len(), w = req.canvas.width, h = req.canvas.height)
)]
pub fn export_canvas(
    renderer: &mut dyn Renderer,
    req: &ExportRequest<'_>,
) -> CanvasResult<ExportArtifact> {
    let frame = renderer
        .render(&RenderRequest {
            images: req.images,
            selected: None,
            viewport: req.viewport,
            canvas: req.canvas,
            background_rgba: req.background_rgba,
            chrome: None,
        })
        .map_err(|e| match e {
            CanvasError::Export(_) => e,
            other => CanvasError::export(format!("snapshot failed: {other}")),
        })
        .inspect_err(|e| {
            tracing::error!(error = %e, "canvas snapshot failed");
        })?;

    let bytes = encode_png(frame).inspect_err(|e| {
        tracing::error!(error = %e, "png export failed");
    })?;

    Ok(ExportArtifact {
        file_name: req.file_name.to_string(),
        width: req.canvas.width,
        height: req.canvas.height,
        bytes,
    })
}

/// Encode a rendered frame as straight-alpha RGBA PNG.
pub fn encode_png(frame: FrameRGBA) -> CanvasResult<Vec<u8>> {
    let FrameRGBA {
        width,
        height,
        mut data,
        premultiplied,
    } = frame;
    if premultiplied {
        unpremultiply_rgba8_in_place(&mut data);
    }

    let img = image::RgbaImage::from_raw(width, height, data).ok_or_else(|| {
        CanvasError::export(format!("frame buffer does not match {width}x{height}"))
    })?;

    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| CanvasError::export(format!("png encode failed: {e}")))?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/png.rs"]
mod tests;
