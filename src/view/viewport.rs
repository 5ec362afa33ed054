use crate::foundation::core::{Affine, Point, Vec2};

/// Zoom/pan mapping between scene space and screen space.
///
/// `screen = offset + scene * scale`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub scale: f64,
    pub offset: Vec2,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

/// Direction of a single zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Positive wheel delta zooms in; `reverse` flips it. A zero delta carries no direction.
    pub fn from_wheel(delta_y: f64, reverse: bool) -> Option<Self> {
        let dir = if delta_y > 0.0 {
            Self::In
        } else if delta_y < 0.0 {
            Self::Out
        } else {
            return None;
        };
        Some(if reverse { dir.flip() } else { dir })
    }

    pub fn flip(self) -> Self {
        match self {
            Self::In => Self::Out,
            Self::Out => Self::In,
        }
    }
}

impl Viewport {
    pub fn to_affine(self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.scale)
    }

    pub fn screen_to_scene(self, p: Point) -> Point {
        ((p.to_vec2() - self.offset) / self.scale).to_point()
    }

    pub fn scene_to_screen(self, p: Point) -> Point {
        (self.offset + p.to_vec2() * self.scale).to_point()
    }

    /// Screen-space length expressed in scene units.
    pub fn screen_len_to_scene(self, len: f64) -> f64 {
        len / self.scale
    }

    /// Zoom one step about the screen point `p`, keeping the scene point under it fixed.
    ///
    /// The new scale is clamped into `[min_scale, max_scale]`; the offset is always derived
    /// from the scale actually applied so the anchor property holds at the bounds too.
    pub fn zoom_at(
        &mut self,
        p: Point,
        dir: ZoomDirection,
        factor: f64,
        min_scale: f64,
        max_scale: f64,
    ) {
        let anchor = self.screen_to_scene(p);
        let new_scale = match dir {
            ZoomDirection::In => self.scale * factor,
            ZoomDirection::Out => self.scale / factor,
        }
        .clamp(min_scale, max_scale);

        *self = Self {
            scale: new_scale,
            offset: p.to_vec2() - anchor.to_vec2() * new_scale,
        };
    }

    pub fn pan_by(&mut self, screen_delta: Vec2) {
        self.offset += screen_delta;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/viewport.rs"]
mod tests;
