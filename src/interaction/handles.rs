//! Selection handles and the bounding-box proposals they produce.
//!
//! Resize happens in the image's own (rotated) frame: the anchor opposite the grabbed handle
//! stays fixed in scene space while the grabbed edges follow the pointer. Rotation follows
//! the pointer's angle around the box center.

use crate::foundation::core::{Affine, Point, Transform2D, Vec2};
use crate::foundation::math::angle_deg;
use crate::scene::model::PlacedImage;
use crate::view::viewport::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Handle {
    TopLeft,
    Top,
    TopRight,
    Right,
    BottomRight,
    Bottom,
    BottomLeft,
    Left,
    Rotate,
}

impl Handle {
    pub const ALL: [Handle; 9] = [
        Handle::TopLeft,
        Handle::Top,
        Handle::TopRight,
        Handle::Right,
        Handle::BottomRight,
        Handle::Bottom,
        Handle::BottomLeft,
        Handle::Left,
        Handle::Rotate,
    ];

    /// Which local edges the handle moves: -1 left/top, +1 right/bottom, 0 neither.
    pub fn signs(self) -> Option<(f64, f64)> {
        Some(match self {
            Self::TopLeft => (-1.0, -1.0),
            Self::Top => (0.0, -1.0),
            Self::TopRight => (1.0, -1.0),
            Self::Right => (1.0, 0.0),
            Self::BottomRight => (1.0, 1.0),
            Self::Bottom => (0.0, 1.0),
            Self::BottomLeft => (-1.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Rotate => return None,
        })
    }

    pub fn is_corner(self) -> bool {
        matches!(self.signs(), Some((sx, sy)) if sx != 0.0 && sy != 0.0)
    }
}

/// A candidate box for the image under manipulation, in scene space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxProposal {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl BoxProposal {
    pub fn of(img: &PlacedImage) -> Self {
        Self {
            center: img.center(),
            width: img.width,
            height: img.height,
            rotation: img.rotation,
        }
    }

    /// The minimum-size policy: anything below `min_size` on either axis is refused.
    pub fn is_acceptable(&self, min_size: f64) -> bool {
        self.center.is_finite()
            && self.rotation.is_finite()
            && self.width >= min_size
            && self.height >= min_size
    }

    pub fn affine(&self) -> Affine {
        Transform2D {
            center: self.center,
            rotation_deg: self.rotation,
            ..Transform2D::default()
        }
        .to_affine(self.width, self.height)
    }

    fn rotate(&self, v: Vec2) -> Vec2 {
        let (s, c) = self.rotation.to_radians().sin_cos();
        Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
    }

    fn unrotate(&self, v: Vec2) -> Vec2 {
        let (s, c) = self.rotation.to_radians().sin_cos();
        Vec2::new(v.x * c + v.y * s, -v.x * s + v.y * c)
    }
}

/// Screen-space positions of every handle for a box.
pub fn handle_points(
    b: &BoxProposal,
    vp: &Viewport,
    rotate_offset_px: f64,
) -> [(Handle, Point); 9] {
    let to_screen = vp.to_affine() * b.affine();
    let (w, h) = (b.width, b.height);
    let local = |sx: f64, sy: f64| Point::new((sx + 1.0) * w / 2.0, (sy + 1.0) * h / 2.0);

    Handle::ALL.map(|handle| {
        let p = match handle.signs() {
            Some((sx, sy)) => to_screen * local(sx, sy),
            None => {
                let top = to_screen * local(0.0, -1.0);
                let up = b.rotate(Vec2::new(0.0, -1.0));
                top + up * rotate_offset_px
            }
        };
        (handle, p)
    })
}

/// The handle within `radius_px` of the screen point, nearest first.
pub fn hit_handle(
    b: &BoxProposal,
    vp: &Viewport,
    pos: Point,
    radius_px: f64,
    rotate_offset_px: f64,
) -> Option<Handle> {
    handle_points(b, vp, rotate_offset_px)
        .into_iter()
        .map(|(h, p)| (h, (p - pos).hypot()))
        .filter(|(_, d)| *d <= radius_px)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(h, _)| h)
}

/// Box produced by dragging a resize handle by `delta` (scene space) from `start`.
///
/// The result is not checked against the minimum size; callers apply that policy.
pub fn resize_proposal(
    start: &BoxProposal,
    handle: Handle,
    delta: Vec2,
    keep_ratio: bool,
) -> BoxProposal {
    let Some((sx, sy)) = handle.signs() else {
        return *start;
    };
    let d = start.unrotate(delta);

    let mut left = -start.width / 2.0;
    let mut right = start.width / 2.0;
    let mut top = -start.height / 2.0;
    let mut bottom = start.height / 2.0;

    if sx > 0.0 {
        right += d.x;
    } else if sx < 0.0 {
        left += d.x;
    }
    if sy > 0.0 {
        bottom += d.y;
    } else if sy < 0.0 {
        top += d.y;
    }

    if keep_ratio && handle.is_corner() && start.width > 0.0 && start.height > 0.0 {
        let kx = (right - left) / start.width;
        let ky = (bottom - top) / start.height;
        let k = if (kx - 1.0).abs() >= (ky - 1.0).abs() { kx } else { ky };
        let (w, h) = (start.width * k, start.height * k);
        if sx > 0.0 {
            right = left + w;
        } else {
            left = right - w;
        }
        if sy > 0.0 {
            bottom = top + h;
        } else {
            top = bottom - h;
        }
    }

    let local_center = Vec2::new((left + right) / 2.0, (top + bottom) / 2.0);
    BoxProposal {
        center: start.center + start.rotate(local_center),
        width: right - left,
        height: bottom - top,
        rotation: start.rotation,
    }
}

/// Box produced by swinging the rotate handle from `grab` to `now` (both scene space).
pub fn rotate_proposal(start: &BoxProposal, grab: Point, now: Point) -> BoxProposal {
    let a0 = angle_deg(grab - start.center);
    let a1 = angle_deg(now - start.center);
    // Shortest signed sweep, in (-180, 180].
    let mut sweep = a1 - a0;
    if sweep > 180.0 {
        sweep -= 360.0;
    } else if sweep <= -180.0 {
        sweep += 360.0;
    }
    BoxProposal {
        rotation: start.rotation + sweep,
        ..*start
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/handles.rs"]
mod tests;
