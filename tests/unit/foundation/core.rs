use super::*;

#[test]
fn image_id_display_is_prefixed() {
    assert_eq!(ImageId(0).to_string(), "image-0");
    assert_eq!(ImageId(42).to_string(), "image-42");
}

#[test]
fn canvas_rejects_empty_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(200, 100).unwrap();
    assert_eq!(c.center(), Point::new(100.0, 50.0));
}

#[test]
fn transform_maps_local_box_around_center() {
    let t = Transform2D {
        center: Point::new(50.0, 50.0),
        ..Transform2D::default()
    };
    let a = t.to_affine(20.0, 10.0);
    assert_eq!(a * Point::new(0.0, 0.0), Point::new(40.0, 45.0));
    assert_eq!(a * Point::new(20.0, 10.0), Point::new(60.0, 55.0));
}

#[test]
fn transform_rotation_is_clockwise_degrees() {
    let t = Transform2D {
        center: Point::ZERO,
        rotation_deg: 90.0,
        ..Transform2D::default()
    };
    // Right-middle of a 20x10 box ends up below the center (y down).
    let p = t.to_affine(20.0, 10.0) * Point::new(20.0, 5.0);
    assert!((p.x - 0.0).abs() < 1e-9);
    assert!((p.y - 10.0).abs() < 1e-9);
}
