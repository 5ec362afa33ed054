use std::collections::HashMap;
use std::sync::Arc;

use crate::foundation::core::{Affine, BezPath, ImageId, Point};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::interaction::handles::{BoxProposal, handle_points};
use crate::render::backend::{FrameRGBA, RenderRequest, Renderer, SelectionChrome};
use crate::scene::model::{PlacedImage, Raster};

const CHROME_RGBA: [u8; 4] = [0, 161, 255, 255];
const CHROME_STROKE_PX: f64 = 1.0;

/// CPU renderer on top of `vello_cpu`.
///
/// Image paints are cached per [`ImageId`]; rasters never change after decode so a cached
/// paint stays valid until its image leaves the scene.
#[derive(Default)]
pub struct CpuRenderer {
    image_cache: HashMap<ImageId, vello_cpu::Image>,
}

impl CpuRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached_images(&self) -> usize {
        self.image_cache.len()
    }

    fn image_paint_for(&mut self, img: &PlacedImage) -> CanvasResult<vello_cpu::Image> {
        if let Some(paint) = self.image_cache.get(&img.id) {
            return Ok(paint.clone());
        }

        let pixmap = raster_to_pixmap(&img.raster)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.image_cache.insert(img.id, paint.clone());
        Ok(paint)
    }
}

impl Renderer for CpuRenderer {
    #[tracing::instrument(skip(self, req), fields(images = req.images.len()))]
    fn render(&mut self, req: &RenderRequest<'_>) -> CanvasResult<FrameRGBA> {
        req.canvas.validate()?;
        let width: u16 = req
            .canvas
            .width
            .try_into()
            .map_err(|_| CanvasError::validation("canvas width exceeds u16"))?;
        let height: u16 = req
            .canvas
            .height
            .try_into()
            .map_err(|_| CanvasError::validation("canvas height exceeds u16"))?;

        self.image_cache
            .retain(|id, _| req.images.iter().any(|img| img.id == *id));

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let [r, g, b, a] = req.background_rgba;
        if a > 0 {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
        }

        let view = req.viewport.to_affine();
        for img in req.images {
            let paint = self.image_paint_for(img)?;
            let natural = img.raster.natural_size();

            ctx.set_transform(affine_to_cpu(view * img.raster_affine()));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, natural.x, natural.y));
        }

        if let Some(chrome) = req.chrome
            && let Some(selected) = req
                .selected
                .and_then(|id| req.images.iter().find(|img| img.id == id))
        {
            draw_selection(&mut ctx, &BoxProposal::of(selected), req, chrome);
        }

        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.flush();
        ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: req.canvas.width,
            height: req.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn draw_selection(
    ctx: &mut vello_cpu::RenderContext,
    b: &BoxProposal,
    req: &RenderRequest<'_>,
    chrome: SelectionChrome,
) {
    let [r, g, bl, a] = CHROME_RGBA;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, bl, a));
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

    let to_screen = req.viewport.to_affine() * b.affine();
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(b.width, 0.0),
        Point::new(b.width, b.height),
        Point::new(0.0, b.height),
    ];
    let mut outline = BezPath::new();
    outline.move_to(to_screen * corners[0]);
    for c in &corners[1..] {
        outline.line_to(to_screen * *c);
    }
    outline.close_path();
    let ring = kurbo::stroke(
        outline,
        &kurbo::Stroke::new(CHROME_STROKE_PX),
        &kurbo::StrokeOpts::default(),
        0.1,
    );
    ctx.fill_path(&bezpath_to_cpu(&ring));

    let half = chrome.handle_radius_px * 0.8;
    for (_, p) in handle_points(b, &req.viewport, chrome.rotate_handle_offset_px) {
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            p.x - half,
            p.y - half,
            p.x + half,
            p.y + half,
        ));
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn raster_to_pixmap(raster: &Raster) -> CanvasResult<vello_cpu::Pixmap> {
    let w: u16 = raster
        .width
        .try_into()
        .map_err(|_| CanvasError::validation("image width exceeds u16"))?;
    let h: u16 = raster
        .height
        .try_into()
        .map_err(|_| CanvasError::validation("image height exceeds u16"))?;
    if raster.rgba8_premul.len() != raster.width as usize * raster.height as usize * 4 {
        return Err(CanvasError::validation("raster byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(raster.width as usize * raster.height as usize);
    for px in raster.rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
