use crate::foundation::core::{Canvas, ImageId};
use crate::foundation::error::CanvasResult;
use crate::scene::model::PlacedImage;
use crate::view::viewport::Viewport;

/// A rendered frame, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

/// Selection outline and handle drawing parameters (screen pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionChrome {
    pub handle_radius_px: f64,
    pub rotate_handle_offset_px: f64,
}

/// Everything needed to paint one frame.
#[derive(Clone, Debug)]
pub struct RenderRequest<'a> {
    /// Paint order: later images on top.
    pub images: &'a [PlacedImage],
    pub selected: Option<ImageId>,
    pub viewport: Viewport,
    pub canvas: Canvas,
    /// Straight (non-premultiplied) RGBA.
    pub background_rgba: [u8; 4],
    /// `None` paints the scene only, as exported.
    pub chrome: Option<SelectionChrome>,
}

/// Paints scene state into pixels.
pub trait Renderer {
    fn render(&mut self, req: &RenderRequest<'_>) -> CanvasResult<FrameRGBA>;
}
