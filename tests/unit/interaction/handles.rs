use super::*;

fn unit_box(rotation: f64) -> BoxProposal {
    BoxProposal {
        center: Point::new(100.0, 100.0),
        width: 200.0,
        height: 100.0,
        rotation,
    }
}

fn near(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn near_pt(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn corner_signs_and_rotate_has_none() {
    assert!(Handle::TopLeft.is_corner());
    assert!(!Handle::Top.is_corner());
    assert!(!Handle::Rotate.is_corner());
    assert_eq!(Handle::Rotate.signs(), None);
}

#[test]
fn handle_points_sit_on_box_and_rotate_above_top() {
    let b = unit_box(0.0);
    let pts = handle_points(&b, &Viewport::default(), 50.0);
    let get = |h: Handle| pts.iter().find(|(k, _)| *k == h).unwrap().1;
    assert!(near_pt(get(Handle::TopLeft), Point::new(0.0, 50.0)));
    assert!(near_pt(get(Handle::BottomRight), Point::new(200.0, 150.0)));
    assert!(near_pt(get(Handle::Right), Point::new(200.0, 100.0)));
    assert!(near_pt(get(Handle::Rotate), Point::new(100.0, 0.0)));
}

#[test]
fn handle_points_follow_viewport() {
    let b = unit_box(0.0);
    let vp = Viewport {
        scale: 2.0,
        offset: Vec2::new(10.0, 0.0),
    };
    let pts = handle_points(&b, &vp, 50.0);
    let br = pts.iter().find(|(k, _)| *k == Handle::BottomRight).unwrap().1;
    assert!(near_pt(br, Point::new(410.0, 300.0)));
    // Rotate offset stays in screen pixels.
    let rot = pts.iter().find(|(k, _)| *k == Handle::Rotate).unwrap().1;
    assert!(near_pt(rot, Point::new(210.0, 50.0)));
}

#[test]
fn hit_handle_uses_radius() {
    let b = unit_box(0.0);
    let vp = Viewport::default();
    assert_eq!(
        hit_handle(&b, &vp, Point::new(203.0, 148.0), 6.0, 50.0),
        Some(Handle::BottomRight)
    );
    assert_eq!(hit_handle(&b, &vp, Point::new(100.0, 100.0), 6.0, 50.0), None);
}

#[test]
fn bottom_right_resize_keeps_top_left_fixed() {
    let b = unit_box(0.0);
    let p = resize_proposal(&b, Handle::BottomRight, Vec2::new(20.0, -10.0), false);
    assert!(near(p.width, 220.0));
    assert!(near(p.height, 90.0));
    let tl = p.affine() * Point::ZERO;
    assert!(near_pt(tl, Point::new(0.0, 50.0)));
}

#[test]
fn edge_resize_moves_single_axis() {
    let b = unit_box(0.0);
    let p = resize_proposal(&b, Handle::Left, Vec2::new(30.0, 999.0), false);
    assert!(near(p.width, 170.0));
    assert!(near(p.height, 100.0));
    assert!(near_pt(p.center, Point::new(115.0, 100.0)));
}

#[test]
fn resize_in_rotated_frame_keeps_opposite_corner() {
    let b = unit_box(90.0);
    let anchor_before = b.affine() * Point::ZERO;
    // On a quarter-turned box the local +x axis points down the screen.
    let p = resize_proposal(&b, Handle::BottomRight, Vec2::new(0.0, 40.0), false);
    assert!(near(p.width, 240.0));
    assert!(near(p.height, 100.0));
    assert!(near_pt(p.affine() * Point::ZERO, anchor_before));
}

#[test]
fn keep_ratio_scales_both_axes() {
    let b = unit_box(0.0);
    let p = resize_proposal(&b, Handle::BottomRight, Vec2::new(100.0, 0.0), true);
    assert!(near(p.width, 300.0));
    assert!(near(p.height, 150.0));
}

#[test]
fn shrinking_past_the_anchor_yields_an_unacceptable_box() {
    let b = unit_box(0.0);
    let p = resize_proposal(&b, Handle::BottomRight, Vec2::new(-197.0, -97.0), false);
    assert!(near(p.width, 3.0));
    assert!(!p.is_acceptable(5.0));
    let p = resize_proposal(&b, Handle::Right, Vec2::new(-300.0, 0.0), false);
    assert!(p.width < 0.0);
    assert!(!p.is_acceptable(5.0));
}

#[test]
fn rotate_follows_pointer_angle() {
    let b = unit_box(10.0);
    let grab = Point::new(100.0, 0.0); // straight above center
    let now = Point::new(200.0, 100.0); // straight right of center
    let p = rotate_proposal(&b, grab, now);
    assert!(near(p.rotation, 100.0));
    assert_eq!((p.width, p.height, p.center), (b.width, b.height, b.center));
}

#[test]
fn rotate_sweep_takes_short_way_round() {
    let b = unit_box(0.0);
    let grab = Point::new(0.0, 99.0); // just above the -x axis (angle near -180)
    let now = Point::new(0.0, 101.0); // just below it (angle near +180)
    let p = rotate_proposal(&b, grab, now);
    assert!(p.rotation.abs() < 5.0);
}
