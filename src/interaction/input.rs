use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::{ImageId, Point};

/// Modifier keys held while an input event fired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Keeps aspect ratio on corner resize.
    pub shift: bool,
    /// Reverses the wheel zoom direction.
    pub ctrl: bool,
    /// Turns a primary press into a viewport pan (e.g. Space held).
    pub pan: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Middle,
    Secondary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Other,
}

/// A file handed over by the host (picker or drag-and-drop).
#[derive(Clone, Debug)]
pub struct DroppedFile {
    pub name: String,
    /// MIME type as reported by the host; may be empty.
    pub mime: String,
    pub bytes: Arc<Vec<u8>>,
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "ico", "tif", "tiff", "svg",
];

impl DroppedFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: Arc::new(bytes),
        }
    }

    /// Whether the host labelled this file as an image.
    ///
    /// The MIME type wins when present; otherwise the file extension decides.
    pub fn is_image(&self) -> bool {
        let mime = self.mime.trim();
        if !mime.is_empty() {
            return mime.to_ascii_lowercase().starts_with("image/");
        }
        Path::new(&self.name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false)
    }
}

/// Raw input delivered by the host, positions in screen space.
#[derive(Clone, Debug)]
pub enum InputEvent {
    PointerDown {
        pos: Point,
        button: PointerButton,
        modifiers: Modifiers,
    },
    PointerMove {
        pos: Point,
        modifiers: Modifiers,
    },
    PointerUp {
        pos: Point,
    },
    /// Touch tap: press and release at one point.
    Tap {
        pos: Point,
    },
    Wheel {
        pos: Point,
        delta_y: f64,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
    },
    /// Drag-and-drop: every image file is imported.
    FilesDropped(Vec<DroppedFile>),
    /// File picker: only the first image file is imported.
    FilesPicked(Vec<DroppedFile>),
}

/// Side effects a host should react to after an event.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    RenderNeeded,
    SelectionChanged(Option<ImageId>),
    ImageUpdated(ImageId),
    ImageDeleted(ImageId),
    ImageAdded(ImageId),
    /// Files handed to the decoder; results arrive via `Editor::pump_imports`.
    ImportQueued(usize),
}
