use std::sync::Arc;

use crate::foundation::core::{Affine, ImageId, Point, Rect, Transform2D, Vec2};

/// Decoded bitmap ready for drawing.
#[derive(Clone, Debug)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Raster {
    pub fn natural_size(&self) -> Vec2 {
        Vec2::new(f64::from(self.width), f64::from(self.height))
    }
}

/// An image placed on the canvas.
///
/// `x`/`y` is the center in scene space. `rotation` is in degrees, clockwise on screen.
#[derive(Clone, Debug)]
pub struct PlacedImage {
    pub id: ImageId,
    pub raster: Raster,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl PlacedImage {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Local box `[0,w] x [0,h]` to scene space.
    pub fn affine(&self) -> Affine {
        Transform2D {
            center: self.center(),
            rotation_deg: self.rotation,
            ..Transform2D::default()
        }
        .to_affine(self.width, self.height)
    }

    /// Raster pixel space to scene space (stretches the raster onto the placed box).
    pub fn raster_affine(&self) -> Affine {
        let natural = self.raster.natural_size();
        Transform2D {
            center: self.center(),
            rotation_deg: self.rotation,
            scale: Vec2::new(self.width / natural.x, self.height / natural.y),
        }
        .to_affine(natural.x, natural.y)
    }

    /// Whether a scene-space point falls inside the rotated box (edges inclusive).
    pub fn contains(&self, p: Point) -> bool {
        let local = self.affine().inverse() * p;
        (0.0..=self.width).contains(&local.x) && (0.0..=self.height).contains(&local.y)
    }

    /// Axis-aligned bounds of the rotated box in scene space.
    pub fn bounds(&self) -> Rect {
        self.affine()
            .transform_rect_bbox(Rect::new(0.0, 0.0, self.width, self.height))
    }

    pub(crate) fn apply(&mut self, patch: &ImagePatch, min_size: f64) {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.width {
            self.width = clamp_extent(w, min_size);
        }
        if let Some(h) = patch.height {
            self.height = clamp_extent(h, min_size);
        }
        if let Some(r) = patch.rotation {
            self.rotation = r;
        }
    }
}

fn clamp_extent(v: f64, min_size: f64) -> f64 {
    // NaN falls to the floor as well.
    if v >= min_size { v } else { min_size }
}

/// Partial update of a [`PlacedImage`]. `None` fields are left untouched.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ImagePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

impl ImagePatch {
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn rotation(deg: f64) -> Self {
        Self {
            rotation: Some(deg),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
