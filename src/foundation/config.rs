use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{Canvas, MIN_IMAGE_SIZE, Point};
use crate::foundation::error::{CanvasError, CanvasResult};

/// Tunables for an editor session.
///
/// Every field has a default, so a config file only needs to name what it overrides:
///
/// ```json
/// { "canvas": { "width": 800, "height": 600 }, "zoom_factor": 1.1 }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Scene-space center at which freshly imported images are placed.
    pub default_placement: Point,
    /// Floor applied to every stored width/height. May raise, never lower,
    /// [`MIN_IMAGE_SIZE`].
    pub min_image_size: f64,
    /// Multiplicative zoom step per wheel event. Must be > 1.
    pub zoom_factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    /// Screen-space pick radius of transform handles.
    pub handle_radius_px: f64,
    /// Screen-space distance of the rotate handle above the top edge.
    pub rotate_handle_offset_px: f64,
    pub export_file_name: String,
    pub canvas: Canvas,
    /// Straight (non-premultiplied) RGBA used to clear the canvas before painting.
    pub background_rgba: [u8; 4],
    /// Decode worker count. `None` uses rayon defaults.
    pub decode_threads: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_placement: Point::new(50.0, 50.0),
            min_image_size: MIN_IMAGE_SIZE,
            zoom_factor: 1.05,
            min_scale: 0.01,
            max_scale: 100.0,
            handle_radius_px: 6.0,
            rotate_handle_offset_px: 50.0,
            export_file_name: "image.png".to_string(),
            canvas: Canvas::default(),
            background_rgba: [0, 0, 0, 0],
            decode_threads: None,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> CanvasResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| CanvasError::validation(format!("parse editor config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> CanvasResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read editor config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> CanvasResult<()> {
        if !self.min_image_size.is_finite() || self.min_image_size < MIN_IMAGE_SIZE {
            return Err(CanvasError::validation(format!(
                "min_image_size must be >= {MIN_IMAGE_SIZE}"
            )));
        }
        if !self.zoom_factor.is_finite() || self.zoom_factor <= 1.0 {
            return Err(CanvasError::validation("zoom_factor must be > 1"));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0 && self.max_scale >= 1.0)
            || !self.max_scale.is_finite()
        {
            return Err(CanvasError::validation(
                "scale bounds must satisfy 0 < min_scale <= 1 <= max_scale",
            ));
        }
        if !(self.handle_radius_px > 0.0) || self.rotate_handle_offset_px < 0.0 {
            return Err(CanvasError::validation(
                "handle radius must be > 0 and rotate offset >= 0",
            ));
        }
        if self.export_file_name.trim().is_empty() {
            return Err(CanvasError::validation("export_file_name must not be empty"));
        }
        if self.decode_threads == Some(0) {
            return Err(CanvasError::validation(
                "decode_threads must be >= 1 when set",
            ));
        }
        self.canvas.validate()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
