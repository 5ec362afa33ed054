use crate::foundation::core::{ImageId, MIN_IMAGE_SIZE, Point};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::scene::model::{ImagePatch, PlacedImage, Raster};

/// Ordered collection of placed images plus the single-selection pointer.
///
/// Paint order is insertion order. Only [`SceneStore::add_image`] and
/// [`SceneStore::remove_image`] change membership or order. The store enforces two
/// invariants itself: every stored width/height is at least `min_size`, and the selection
/// always names an image that is present.
#[derive(Clone, Debug)]
pub struct SceneStore {
    images: Vec<PlacedImage>,
    selected: Option<ImageId>,
    next_id: u64,
    placement: Point,
    min_size: f64,
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new(Point::new(50.0, 50.0), MIN_IMAGE_SIZE)
    }
}

impl SceneStore {
    /// `min_size` below [`MIN_IMAGE_SIZE`] (or NaN) is raised to it.
    pub fn new(placement: Point, min_size: f64) -> Self {
        Self {
            images: Vec::new(),
            selected: None,
            next_id: 0,
            placement,
            min_size: min_size.max(MIN_IMAGE_SIZE),
        }
    }

    /// Append a freshly decoded raster at the default placement and select it.
    pub fn add_image(&mut self, raster: Raster) -> ImageId {
        let id = ImageId(self.next_id);
        self.next_id += 1;

        let natural = raster.natural_size();
        let mut img = PlacedImage {
            id,
            raster,
            x: self.placement.x,
            y: self.placement.y,
            width: self.min_size,
            height: self.min_size,
            rotation: 0.0,
        };
        img.apply(&ImagePatch::size(natural.x, natural.y), self.min_size);

        self.images.push(img);
        self.selected = Some(id);
        id
    }

    /// Merge `patch` into the image with `id`, in place.
    pub fn update_image(&mut self, id: ImageId, patch: &ImagePatch) -> CanvasResult<()> {
        let min_size = self.min_size;
        let img = self.get_mut(id).ok_or(CanvasError::NotFound(id))?;
        img.apply(patch, min_size);
        Ok(())
    }

    pub fn remove_image(&mut self, id: ImageId) -> Option<PlacedImage> {
        let idx = self.index_of(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.images.remove(idx))
    }

    /// Set or clear the selection. Unknown ids leave the selection untouched.
    pub fn select(&mut self, id: Option<ImageId>) -> CanvasResult<()> {
        match id {
            Some(id) if self.index_of(id).is_none() => Err(CanvasError::NotFound(id)),
            _ => {
                self.selected = id;
                Ok(())
            }
        }
    }

    /// Drop the selection. Returns whether anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn selected(&self) -> Option<ImageId> {
        self.selected
    }

    pub fn selected_image(&self) -> Option<&PlacedImage> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn images(&self) -> &[PlacedImage] {
        &self.images
    }

    pub fn get(&self, id: ImageId) -> Option<&PlacedImage> {
        self.images.iter().find(|img| img.id == id)
    }

    fn get_mut(&mut self, id: ImageId) -> Option<&mut PlacedImage> {
        self.images.iter_mut().find(|img| img.id == id)
    }

    fn index_of(&self, id: ImageId) -> Option<usize> {
        self.images.iter().position(|img| img.id == id)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    /// Topmost image whose rotated box contains the scene-space point.
    pub fn hit_test(&self, p: Point) -> Option<ImageId> {
        self.images
            .iter()
            .rev()
            .find(|img| img.contains(p))
            .map(|img| img.id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;
