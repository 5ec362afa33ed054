use std::sync::Arc;

use super::*;

fn raster(w: u32, h: u32) -> Raster {
    Raster {
        width: w,
        height: h,
        rgba8_premul: Arc::new(vec![0; (w * h * 4) as usize]),
    }
}

fn ids(store: &SceneStore) -> Vec<ImageId> {
    store.images().iter().map(|i| i.id).collect()
}

fn assert_selection_consistent(store: &SceneStore) {
    if let Some(id) = store.selected() {
        assert!(store.get(id).is_some(), "selection {id} dangles");
    }
}

#[test]
fn add_places_at_default_with_natural_size_and_selects() {
    let mut store = SceneStore::default();
    let id = store.add_image(raster(200, 100));
    let img = store.get(id).unwrap();
    assert_eq!((img.x, img.y), (50.0, 50.0));
    assert_eq!((img.width, img.height), (200.0, 100.0));
    assert_eq!(img.rotation, 0.0);
    assert_eq!(store.selected(), Some(id));
}

#[test]
fn tiny_raster_is_lifted_to_min_size() {
    let mut store = SceneStore::default();
    let id = store.add_image(raster(1, 3));
    let img = store.get(id).unwrap();
    assert_eq!((img.width, img.height), (5.0, 5.0));
    assert_eq!(img.raster.width, 1);
}

#[test]
fn ids_are_never_reused() {
    let mut store = SceneStore::default();
    let a = store.add_image(raster(10, 10));
    store.remove_image(a);
    let b = store.add_image(raster(10, 10));
    assert_ne!(a, b);
}

#[test]
fn update_clamps_and_preserves_order() {
    let mut store = SceneStore::default();
    let a = store.add_image(raster(10, 10));
    let b = store.add_image(raster(10, 10));
    let c = store.add_image(raster(10, 10));
    let before = ids(&store);

    store.update_image(a, &ImagePatch::size(2.0, 50.0)).unwrap();
    store.update_image(c, &ImagePatch::position(-5.0, 7.5)).unwrap();
    store.update_image(b, &ImagePatch::rotation(370.0)).unwrap();

    assert_eq!(ids(&store), before);
    let img = store.get(a).unwrap();
    assert_eq!((img.width, img.height), (5.0, 50.0));
    assert_eq!(store.get(b).unwrap().rotation, 370.0);
    assert_eq!(store.get(c).unwrap().center(), Point::new(-5.0, 7.5));
}

#[test]
fn update_unknown_id_reports_not_found_and_changes_nothing() {
    let mut store = SceneStore::default();
    let a = store.add_image(raster(10, 10));
    let err = store
        .update_image(ImageId(99), &ImagePatch::position(1.0, 1.0))
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(store.get(a).unwrap().center(), Point::new(50.0, 50.0));
}

#[test]
fn remove_selected_clears_selection_and_unselected_keeps_it() {
    let mut store = SceneStore::default();
    let a = store.add_image(raster(10, 10));
    let b = store.add_image(raster(10, 10));
    assert_eq!(store.selected(), Some(b));

    assert!(store.remove_image(a).is_some());
    assert_eq!(store.selected(), Some(b));

    assert!(store.remove_image(b).is_some());
    assert_eq!(store.selected(), None);
    assert!(store.remove_image(b).is_none());
    assert!(store.is_empty());
}

#[test]
fn select_unknown_is_rejected_without_touching_selection() {
    let mut store = SceneStore::default();
    let a = store.add_image(raster(10, 10));
    assert!(store.select(Some(ImageId(1234))).is_err());
    assert_eq!(store.selected(), Some(a));
    store.select(None).unwrap();
    assert_eq!(store.selected(), None);
    store.select(Some(a)).unwrap();
    assert_eq!(store.selected_image().map(|i| i.id), Some(a));
}

#[test]
fn selection_stays_consistent_over_mixed_sequences() {
    let mut store = SceneStore::default();
    let mut live = Vec::new();
    for step in 0u64..200 {
        // Small deterministic LCG so the sequence is reproducible.
        let r = step.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407) >> 33;
        match r % 4 {
            0 | 1 => live.push(store.add_image(raster(4, 4))),
            2 if !live.is_empty() => {
                let id = live.remove((r as usize) % live.len());
                store.remove_image(id);
            }
            _ => {
                let pick = live.get((r as usize) % live.len().max(1)).copied();
                let _ = store.select(pick);
            }
        }
        assert_selection_consistent(&store);
        assert_eq!(store.len(), live.len());
    }
}

#[test]
fn hit_test_prefers_topmost() {
    let mut store = SceneStore::default();
    let bottom = store.add_image(raster(100, 100));
    let top = store.add_image(raster(20, 20));
    assert_eq!(store.hit_test(Point::new(50.0, 50.0)), Some(top));
    assert_eq!(store.hit_test(Point::new(10.0, 10.0)), Some(bottom));
    assert_eq!(store.hit_test(Point::new(500.0, 10.0)), None);
}

#[test]
fn floor_below_minimum_is_raised() {
    let mut store = SceneStore::new(Point::new(0.0, 0.0), 1.0);
    assert_eq!(store.min_size(), MIN_IMAGE_SIZE);
    let id = store.add_image(raster(2, 2));
    let img = store.get(id).unwrap();
    assert_eq!((img.width, img.height), (5.0, 5.0));
}

#[test]
fn clear_selection_reports_whether_it_changed_anything() {
    let mut store = SceneStore::default();
    let id = store.add_image(raster(10, 10));
    assert_eq!(store.selected(), Some(id));
    assert!(store.clear_selection());
    assert_eq!(store.selected(), None);
    assert!(!store.clear_selection());
}
