//! imgboard is the core of an image-canvas editor.
//!
//! Users import raster images, arrange them on a 2-D canvas by dragging, resizing, rotating
//! and zooming, delete them, and export the composed canvas as a flattened PNG.
//!
//! # Overview
//!
//! 1. **Import**: dropped or picked files are decoded on a worker pool ([`ImportQueue`]) and
//!    appended to the [`SceneStore`] when the owner applies them.
//! 2. **Interact**: [`InputEvent`]s drive the [`Controller`] state machine, which mutates the
//!    store and the [`Viewport`] and answers with [`Action`]s.
//! 3. **Render**: a [`Renderer`] paints the visible scene into a [`FrameRGBA`]
//!    ([`CpuRenderer`] by default).
//! 4. **Export**: [`export_canvas`] flattens the canvas as displayed into an
//!    [`ExportArtifact`].
//!
//! [`Editor`] wires all of these together behind one owner-thread API.
//!
//! Invariants held by the core:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Minimum size**: every stored width/height is at least [`MIN_IMAGE_SIZE`].
//! - **Selection consistency**: the selection always names an image that is present.
//! - **Premultiplied RGBA8** inside the renderer; exports are straight alpha.
#![forbid(unsafe_code)]

mod foundation;

/// Decoding and the background import queue.
pub mod assets;
/// The editor session and toolbar.
pub mod editor;
/// PNG export.
pub mod export;
pub mod interaction;
pub mod render;
pub mod scene;
/// Zoom and pan.
pub mod view;

pub use crate::foundation::config::EditorConfig;
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, ImageId, MIN_IMAGE_SIZE, Point, Rect, Transform2D, Vec2,
};
pub use crate::foundation::error::{CanvasError, CanvasResult};

pub use crate::assets::decode::{MAX_RASTER_EDGE, decode_image};
pub use crate::assets::import::{DecodeOutcome, ImportQueue, ImportTicket};
pub use crate::editor::session::{
    Editor, ImportFailure, ImportReport, ToolbarAction, ToolbarState,
};
pub use crate::export::png::{ExportArtifact, ExportRequest, encode_png, export_canvas};
pub use crate::interaction::controller::{Controller, InteractionSettings, LiveNode, Mode};
pub use crate::interaction::handles::{BoxProposal, Handle};
pub use crate::interaction::input::{
    Action, DroppedFile, InputEvent, Key, Modifiers, PointerButton,
};
pub use crate::render::backend::{FrameRGBA, RenderRequest, Renderer, SelectionChrome};
pub use crate::render::cpu::CpuRenderer;
pub use crate::scene::model::{ImagePatch, PlacedImage, Raster};
pub use crate::scene::store::SceneStore;
pub use crate::view::viewport::{Viewport, ZoomDirection};
