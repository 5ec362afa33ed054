use crate::foundation::config::EditorConfig;
use crate::foundation::core::{ImageId, Point, Vec2};
use crate::interaction::handles::{
    BoxProposal, Handle, hit_handle, resize_proposal, rotate_proposal,
};
use crate::interaction::input::{Action, DroppedFile, InputEvent, Key, Modifiers, PointerButton};
use crate::scene::model::{ImagePatch, PlacedImage};
use crate::scene::store::SceneStore;
use crate::view::viewport::{Viewport, ZoomDirection};

/// The subset of [`EditorConfig`] that drives gestures.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InteractionSettings {
    pub min_size: f64,
    pub zoom_factor: f64,
    pub min_scale: f64,
    pub max_scale: f64,
    pub handle_radius_px: f64,
    pub rotate_handle_offset_px: f64,
}

impl From<&EditorConfig> for InteractionSettings {
    fn from(cfg: &EditorConfig) -> Self {
        Self {
            min_size: cfg.min_image_size,
            zoom_factor: cfg.zoom_factor,
            min_scale: cfg.min_scale,
            max_scale: cfg.max_scale,
            handle_radius_px: cfg.handle_radius_px,
            rotate_handle_offset_px: cfg.rotate_handle_offset_px,
        }
    }
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self::from(&EditorConfig::default())
    }
}

/// Display-side state of the image being manipulated.
///
/// Mirrors what a retained renderer node holds mid-gesture: the pre-gesture base size plus a
/// scale factor. The store is only written when the gesture ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LiveNode {
    pub id: ImageId,
    pub center: Point,
    pub rotation: f64,
    pub base_width: f64,
    pub base_height: f64,
    pub scale: Vec2,
}

impl LiveNode {
    fn of(img: &PlacedImage) -> Self {
        Self {
            id: img.id,
            center: img.center(),
            rotation: img.rotation,
            base_width: img.width,
            base_height: img.height,
            scale: Vec2::new(1.0, 1.0),
        }
    }

    pub fn bounding_box(&self) -> BoxProposal {
        BoxProposal {
            center: self.center,
            width: self.base_width * self.scale.x,
            height: self.base_height * self.scale.y,
            rotation: self.rotation,
        }
    }

    fn set_box(&mut self, b: BoxProposal) {
        self.center = b.center;
        self.rotation = b.rotation;
        self.scale = Vec2::new(b.width / self.base_width, b.height / self.base_height);
    }

    /// Fold the node scale back into width/height, floored at `min_size`.
    fn commit_patch(&self, min_size: f64) -> ImagePatch {
        ImagePatch {
            x: Some(self.center.x),
            y: Some(self.center.y),
            width: Some((self.base_width * self.scale.x).max(min_size)),
            height: Some((self.base_height * self.scale.y).max(min_size)),
            rotation: Some(self.rotation),
        }
    }

    /// The image as it should be painted right now.
    pub fn overlay(&self, img: &PlacedImage) -> PlacedImage {
        let b = self.bounding_box();
        PlacedImage {
            x: b.center.x,
            y: b.center.y,
            width: b.width,
            height: b.height,
            rotation: b.rotation,
            ..img.clone()
        }
    }
}

#[derive(Clone, Debug)]
enum Gesture {
    Idle,
    Dragging {
        grab_scene: Point,
        start_center: Point,
        node: LiveNode,
    },
    Transforming {
        handle: Handle,
        grab_scene: Point,
        start: BoxProposal,
        node: LiveNode,
        /// Modifiers seen on the latest press or move; a release carries none of its own.
        modifiers: Modifiers,
    },
    Panning {
        last_screen: Point,
    },
}

/// Observable interaction mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Mode {
    Idle,
    Dragging(ImageId),
    Transforming(ImageId, Handle),
    Panning,
}

/// Turns raw input into scene-store and viewport mutations.
///
/// One gesture is active at a time. Drags and transforms are tracked on a [`LiveNode`] and
/// committed to the store on release; wheel zoom is applied to the viewport immediately.
#[derive(Clone, Debug)]
pub struct Controller {
    settings: InteractionSettings,
    gesture: Gesture,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(InteractionSettings::default())
    }
}

impl Controller {
    pub fn new(settings: InteractionSettings) -> Self {
        Self {
            settings,
            gesture: Gesture::Idle,
        }
    }

    pub fn settings(&self) -> &InteractionSettings {
        &self.settings
    }

    pub fn mode(&self) -> Mode {
        match &self.gesture {
            Gesture::Idle => Mode::Idle,
            Gesture::Dragging { node, .. } => Mode::Dragging(node.id),
            Gesture::Transforming { handle, node, .. } => Mode::Transforming(node.id, *handle),
            Gesture::Panning { .. } => Mode::Panning,
        }
    }

    /// The node being dragged or transformed, if any.
    pub fn live_node(&self) -> Option<&LiveNode> {
        match &self.gesture {
            Gesture::Dragging { node, .. } | Gesture::Transforming { node, .. } => Some(node),
            Gesture::Idle | Gesture::Panning { .. } => None,
        }
    }

    /// Route a pointer, wheel or keyboard event. File events are ignored here; see
    /// [`Controller::accept_files`].
    pub fn handle(
        &mut self,
        store: &mut SceneStore,
        vp: &mut Viewport,
        event: &InputEvent,
    ) -> Vec<Action> {
        let mut actions = Vec::new();
        match event {
            InputEvent::PointerDown {
                pos,
                button,
                modifiers,
            } => self.pointer_down(store, vp, *pos, *button, *modifiers, &mut actions),
            InputEvent::PointerMove { pos, modifiers } => {
                self.pointer_move(vp, *pos, *modifiers, &mut actions)
            }
            InputEvent::PointerUp { pos } => self.pointer_up(store, vp, *pos, &mut actions),
            InputEvent::Tap { pos } => {
                self.pointer_down(
                    store,
                    vp,
                    *pos,
                    PointerButton::Primary,
                    Modifiers::default(),
                    &mut actions,
                );
                self.pointer_up(store, vp, *pos, &mut actions);
            }
            InputEvent::Wheel {
                pos,
                delta_y,
                modifiers,
            } => self.wheel(vp, *pos, *delta_y, *modifiers, &mut actions),
            InputEvent::KeyDown { key } => self.key_down(store, *key, &mut actions),
            InputEvent::FilesDropped(_) | InputEvent::FilesPicked(_) => {}
        }
        dedup_render(&mut actions);
        actions
    }

    /// Image files from a drop or picker event, in the order received.
    ///
    /// A drop keeps every image file; a picker selection keeps only the first one. Other
    /// files are skipped without error.
    pub fn accept_files(event: &InputEvent) -> Vec<DroppedFile> {
        let (files, first_only) = match event {
            InputEvent::FilesDropped(files) => (files, false),
            InputEvent::FilesPicked(files) => (files, true),
            _ => return Vec::new(),
        };

        let mut accepted = Vec::new();
        for f in files {
            if !f.is_image() {
                tracing::debug!(name = %f.name, mime = %f.mime, "skipping non-image file");
                continue;
            }
            accepted.push(f.clone());
            if first_only {
                break;
            }
        }
        accepted
    }

    /// Remove the selected image. No-op without a selection.
    pub fn delete_selected(&mut self, store: &mut SceneStore, actions: &mut Vec<Action>) {
        let Some(id) = store.selected() else {
            return;
        };
        if self.live_node().is_some_and(|n| n.id == id) {
            self.gesture = Gesture::Idle;
        }
        if store.remove_image(id).is_some() {
            tracing::debug!(%id, "deleted image");
            actions.push(Action::ImageDeleted(id));
            actions.push(Action::SelectionChanged(None));
            actions.push(Action::RenderNeeded);
        }
    }

    /// Drop any active gesture without committing it.
    pub fn cancel(&mut self, actions: &mut Vec<Action>) {
        if !matches!(self.gesture, Gesture::Idle) {
            self.gesture = Gesture::Idle;
            actions.push(Action::RenderNeeded);
        }
    }

    fn pointer_down(
        &mut self,
        store: &mut SceneStore,
        vp: &Viewport,
        pos: Point,
        button: PointerButton,
        modifiers: Modifiers,
        actions: &mut Vec<Action>,
    ) {
        // A press while a gesture is still open means the release was lost; keep what the
        // user last saw.
        self.finish(store, actions);

        let pan = button == PointerButton::Middle
            || (button == PointerButton::Primary && modifiers.pan);
        if pan {
            self.gesture = Gesture::Panning { last_screen: pos };
            return;
        }
        if button != PointerButton::Primary {
            return;
        }

        let scene_pt = vp.screen_to_scene(pos);

        if let Some(img) = store.selected_image() {
            let b = BoxProposal::of(img);
            if let Some(handle) = hit_handle(
                &b,
                vp,
                pos,
                self.settings.handle_radius_px,
                self.settings.rotate_handle_offset_px,
            ) {
                tracing::debug!(id = %img.id, ?handle, "transform start");
                self.gesture = Gesture::Transforming {
                    handle,
                    grab_scene: scene_pt,
                    start: b,
                    node: LiveNode::of(img),
                    modifiers,
                };
                return;
            }
        }

        match store.hit_test(scene_pt) {
            Some(id) => {
                if store.selected() != Some(id) {
                    match store.select(Some(id)) {
                        Ok(()) => {
                            actions.push(Action::SelectionChanged(Some(id)));
                            actions.push(Action::RenderNeeded);
                        }
                        Err(e) => tracing::debug!(%id, error = %e, "select after hit test failed"),
                    }
                }
                if let Some(img) = store.get(id) {
                    self.gesture = Gesture::Dragging {
                        grab_scene: scene_pt,
                        start_center: img.center(),
                        node: LiveNode::of(img),
                    };
                }
            }
            None => {
                if store.clear_selection() {
                    actions.push(Action::SelectionChanged(None));
                    actions.push(Action::RenderNeeded);
                }
            }
        }
    }

    fn pointer_move(
        &mut self,
        vp: &mut Viewport,
        pos: Point,
        modifiers: Modifiers,
        actions: &mut Vec<Action>,
    ) {
        let min_size = self.settings.min_size;
        match &mut self.gesture {
            Gesture::Idle => {}
            Gesture::Panning { last_screen } => {
                vp.pan_by(pos - *last_screen);
                *last_screen = pos;
                actions.push(Action::RenderNeeded);
            }
            Gesture::Dragging {
                grab_scene,
                start_center,
                node,
            } => {
                node.center = *start_center + (vp.screen_to_scene(pos) - *grab_scene);
                actions.push(Action::RenderNeeded);
            }
            Gesture::Transforming {
                handle,
                grab_scene,
                start,
                node,
                modifiers: last,
            } => {
                *last = modifiers;
                let now = vp.screen_to_scene(pos);
                let proposal = match handle {
                    Handle::Rotate => rotate_proposal(start, *grab_scene, now),
                    h => resize_proposal(start, *h, now - *grab_scene, modifiers.shift),
                };
                if proposal.is_acceptable(min_size) {
                    node.set_box(proposal);
                    actions.push(Action::RenderNeeded);
                } else {
                    tracing::trace!(
                        id = %node.id,
                        width = proposal.width,
                        height = proposal.height,
                        "rejected box proposal below minimum size"
                    );
                }
            }
        }
    }

    fn pointer_up(
        &mut self,
        store: &mut SceneStore,
        vp: &mut Viewport,
        pos: Point,
        actions: &mut Vec<Action>,
    ) {
        let modifiers = match &self.gesture {
            Gesture::Transforming { modifiers, .. } => *modifiers,
            _ => Modifiers::default(),
        };
        self.pointer_move(vp, pos, modifiers, actions);
        self.finish(store, actions);
    }

    /// Commit the live node (if any) and return to idle.
    fn finish(&mut self, store: &mut SceneStore, actions: &mut Vec<Action>) {
        let gesture = std::mem::replace(&mut self.gesture, Gesture::Idle);
        let node = match gesture {
            Gesture::Dragging { node, .. } | Gesture::Transforming { node, .. } => node,
            Gesture::Idle | Gesture::Panning { .. } => return,
        };

        match store.update_image(node.id, &node.commit_patch(self.settings.min_size)) {
            Ok(()) => {
                actions.push(Action::ImageUpdated(node.id));
                actions.push(Action::RenderNeeded);
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(id = %node.id, "gesture ended on a removed image");
            }
            Err(e) => {
                tracing::warn!(id = %node.id, error = %e, "failed to commit gesture");
            }
        }
    }

    fn wheel(
        &mut self,
        vp: &mut Viewport,
        pos: Point,
        delta_y: f64,
        modifiers: Modifiers,
        actions: &mut Vec<Action>,
    ) {
        let Some(dir) = ZoomDirection::from_wheel(delta_y, modifiers.ctrl) else {
            return;
        };
        vp.zoom_at(
            pos,
            dir,
            self.settings.zoom_factor,
            self.settings.min_scale,
            self.settings.max_scale,
        );
        actions.push(Action::RenderNeeded);
    }

    fn key_down(&mut self, store: &mut SceneStore, key: Key, actions: &mut Vec<Action>) {
        match key {
            Key::Delete | Key::Backspace => self.delete_selected(store, actions),
            Key::Escape => {
                if matches!(self.gesture, Gesture::Idle) {
                    if store.clear_selection() {
                        actions.push(Action::SelectionChanged(None));
                        actions.push(Action::RenderNeeded);
                    }
                } else {
                    self.cancel(actions);
                }
            }
            Key::Other => {}
        }
    }
}

/// Keep a single trailing `RenderNeeded`.
fn dedup_render(actions: &mut Vec<Action>) {
    let needs = actions.iter().any(|a| *a == Action::RenderNeeded);
    actions.retain(|a| *a != Action::RenderNeeded);
    if needs {
        actions.push(Action::RenderNeeded);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/controller.rs"]
mod tests;
