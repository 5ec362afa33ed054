use crate::assets::import::{DecodeOutcome, ImportQueue};
use crate::export::png::{ExportArtifact, ExportRequest, export_canvas};
use crate::foundation::config::EditorConfig;
use crate::foundation::core::ImageId;
use crate::foundation::error::CanvasResult;
use crate::interaction::controller::{Controller, InteractionSettings, Mode};
use crate::interaction::input::{Action, InputEvent};
use crate::render::backend::{FrameRGBA, RenderRequest, Renderer, SelectionChrome};
use crate::render::cpu::CpuRenderer;
use crate::scene::model::PlacedImage;
use crate::scene::store::SceneStore;
use crate::view::viewport::Viewport;

/// Commands offered by the editor toolbar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToolbarAction {
    /// Open the host file picker; the picked files come back as [`InputEvent::FilesPicked`].
    Import,
    Delete,
    Export,
}

/// Which toolbar commands are currently available.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ToolbarState {
    pub import: bool,
    pub delete: bool,
    pub export: bool,
}

impl ToolbarState {
    pub fn is_enabled(self, action: ToolbarAction) -> bool {
        match action {
            ToolbarAction::Import => self.import,
            ToolbarAction::Delete => self.delete,
            ToolbarAction::Export => self.export,
        }
    }
}

/// A file that could not be imported.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportFailure {
    pub name: String,
    pub reason: String,
}

/// Outcome of applying finished decodes to the scene.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImportReport {
    /// New images, in the order they were appended.
    pub added: Vec<ImageId>,
    pub failed: Vec<ImportFailure>,
}

impl ImportReport {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.failed.is_empty()
    }

    /// Host-facing actions for this report.
    pub fn actions(&self) -> Vec<Action> {
        let mut actions: Vec<Action> =
            self.added.iter().copied().map(Action::ImageAdded).collect();
        if let Some(last) = self.added.last() {
            actions.push(Action::SelectionChanged(Some(*last)));
            actions.push(Action::RenderNeeded);
        }
        actions
    }
}

/// One editing session: scene, view, gestures, background imports and rendering.
///
/// All state lives on the thread that owns the editor. Decodes run on worker threads and only
/// touch the scene when the owner calls [`Editor::pump_imports`] or [`Editor::wait_imports`].
pub struct Editor {
    config: EditorConfig,
    store: SceneStore,
    viewport: Viewport,
    controller: Controller,
    imports: ImportQueue,
    renderer: Box<dyn Renderer>,
}

impl Editor {
    pub fn new(config: EditorConfig) -> CanvasResult<Self> {
        Self::with_renderer(config, Box::new(CpuRenderer::new()))
    }

    pub fn with_renderer(config: EditorConfig, renderer: Box<dyn Renderer>) -> CanvasResult<Self> {
        config.validate()?;
        let imports = ImportQueue::new(config.decode_threads)?;
        Ok(Self {
            store: SceneStore::new(config.default_placement, config.min_image_size),
            viewport: Viewport::default(),
            controller: Controller::new(InteractionSettings::from(&config)),
            imports,
            renderer,
            config,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn store(&self) -> &SceneStore {
        &self.store
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Files submitted for decode whose results have not been applied yet.
    pub fn pending_imports(&self) -> usize {
        self.imports.in_flight()
    }

    /// Feed one input event.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<Action> {
        match event {
            InputEvent::FilesDropped(_) | InputEvent::FilesPicked(_) => {
                let files = Controller::accept_files(event);
                let n = files.len();
                for file in files {
                    let name = file.name.clone();
                    let ticket = self.imports.submit(file);
                    tracing::debug!(%name, ticket = ticket.0, "queued import");
                }
                if n == 0 {
                    Vec::new()
                } else {
                    vec![Action::ImportQueued(n)]
                }
            }
            _ => self.controller.handle(&mut self.store, &mut self.viewport, event),
        }
    }

    /// Apply decodes that have already finished, without blocking.
    #[tracing::instrument(skip(self), fields(in_flight = self.imports.in_flight()))]
    pub fn pump_imports(&mut self) -> ImportReport {
        let done = self.imports.poll();
        self.apply_imports(done)
    }

    /// Block until every queued file has been decoded, then apply the results.
    #[tracing::instrument(skip(self), fields(in_flight = self.imports.in_flight()))]
    pub fn wait_imports(&mut self) -> ImportReport {
        let done = self.imports.wait();
        self.apply_imports(done)
    }

    fn apply_imports(&mut self, mut done: Vec<DecodeOutcome>) -> ImportReport {
        done.sort_by_key(|o| o.ticket);

        let mut report = ImportReport::default();
        for outcome in done {
            match outcome.result {
                Ok(raster) => {
                    let id = self.store.add_image(raster);
                    tracing::debug!(%id, name = %outcome.name, "imported image");
                    report.added.push(id);
                }
                Err(e) => {
                    tracing::warn!(
                        name = %outcome.name,
                        error = %e,
                        "skipping file that failed to decode"
                    );
                    report.failed.push(ImportFailure {
                        name: outcome.name,
                        reason: e.to_string(),
                    });
                }
            }
        }
        report
    }

    /// Scene images as currently on screen, with any in-progress gesture applied.
    pub fn visible_images(&self) -> Vec<PlacedImage> {
        let live = self.controller.live_node();
        self.store
            .images()
            .iter()
            .map(|img| match live {
                Some(node) if node.id == img.id => node.overlay(img),
                _ => img.clone(),
            })
            .collect()
    }

    /// Paint the canvas for display, selection outline and handles included.
    pub fn render_frame(&mut self) -> CanvasResult<FrameRGBA> {
        let images = self.visible_images();
        self.renderer.render(&RenderRequest {
            images: &images,
            selected: self.store.selected(),
            viewport: self.viewport,
            canvas: self.config.canvas,
            background_rgba: self.config.background_rgba,
            chrome: Some(SelectionChrome {
                handle_radius_px: self.config.handle_radius_px,
                rotate_handle_offset_px: self.config.rotate_handle_offset_px,
            }),
        })
    }

    /// Flatten the visible canvas into a PNG download.
    pub fn export(&mut self) -> CanvasResult<ExportArtifact> {
        let images = self.visible_images();
        export_canvas(
            self.renderer.as_mut(),
            &ExportRequest {
                images: &images,
                viewport: self.viewport,
                canvas: self.config.canvas,
                background_rgba: self.config.background_rgba,
                file_name: &self.config.export_file_name,
            },
        )
    }

    pub fn toolbar_state(&self) -> ToolbarState {
        ToolbarState {
            import: true,
            delete: self.store.selected().is_some(),
            export: !self.store.is_empty(),
        }
    }

    /// The toolbar delete command.
    pub fn delete_selected(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.controller.delete_selected(&mut self.store, &mut actions);
        actions
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
