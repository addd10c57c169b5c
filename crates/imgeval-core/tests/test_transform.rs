use approx::assert_relative_eq;
use proptest::prelude::*;

use imgeval_core::model::ZoomLevels;
use imgeval_core::transform::{Point, ViewEvent, ViewTransform};

fn levels() -> ZoomLevels {
    ZoomLevels::new(vec![0.25, 0.5, 0.75, 1.0, 2.0, 4.0]).unwrap()
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn test_starts_at_unit_zoom() {
    let levels = levels();
    let t = ViewTransform::new(&levels);
    assert_eq!(t.zoom_index(), 3);
    assert_relative_eq!(t.zoom(&levels), 1.0);
}

#[test]
fn test_wheel_up_four_times_from_index_three_stops_at_last() {
    let levels = levels();
    let mut t = ViewTransform::new(&levels);
    for _ in 0..4 {
        t.apply(ViewEvent::Wheel { delta_y: -120.0 }, &levels);
    }
    assert_eq!(t.zoom_index(), 5);
    assert_relative_eq!(t.zoom(&levels), 4.0);
}

#[test]
fn test_wheel_down_stops_at_first() {
    let levels = levels();
    let mut t = ViewTransform::new(&levels);
    for _ in 0..10 {
        t.wheel(53.0, &levels);
    }
    assert_eq!(t.zoom_index(), 0);
    assert!(!t.wheel(53.0, &levels));
}

#[test]
fn test_wheel_zero_delta_is_noop() {
    let levels = levels();
    let mut t = ViewTransform::new(&levels);
    assert!(!t.wheel(0.0, &levels));
    assert_eq!(t.zoom_index(), 3);
}

#[test]
fn test_set_zoom_index_clamps() {
    let levels = levels();
    let mut t = ViewTransform::new(&levels);
    t.set_zoom_index(42, &levels);
    assert_eq!(t.zoom_index(), 5);
}

// ---------------------------------------------------------------------------
// Drag
// ---------------------------------------------------------------------------

#[test]
fn test_drag_pans_by_incremental_delta() {
    let levels = levels();
    let mut t = ViewTransform::new(&levels);
    t.apply(ViewEvent::PointerDown(Point::new(10.0, 10.0)), &levels);
    assert!(t.apply(ViewEvent::PointerMove(Point::new(15.0, 8.0)), &levels));
    assert!(t.apply(ViewEvent::PointerMove(Point::new(20.0, 4.0)), &levels));
    assert_eq!(t.pan(), Point::new(10.0, -6.0));
}

#[test]
fn test_move_without_press_does_nothing() {
    let levels = levels();
    let mut t = ViewTransform::new(&levels);
    assert!(!t.apply(ViewEvent::PointerMove(Point::new(50.0, 50.0)), &levels));
    assert_eq!(t.pan(), Point::ZERO);
}

#[test]
fn test_leave_ends_drag() {
    let levels = levels();
    let mut t = ViewTransform::new(&levels);
    t.pointer_down(Point::new(0.0, 0.0));
    t.apply(ViewEvent::PointerLeave, &levels);
    assert!(!t.dragging());
    assert!(!t.pointer_move(Point::new(5.0, 5.0)));
    assert_eq!(t.pan(), Point::ZERO);
}

#[test]
fn test_reset_pan_keeps_zoom_and_flip() {
    let levels = levels();
    let mut t = ViewTransform::new(&levels);
    t.wheel(-1.0, &levels);
    t.toggle_flip();
    t.pointer_down(Point::ZERO);
    t.pointer_move(Point::new(-30.0, -40.0));
    t.reset_pan();
    assert_eq!(t.pan(), Point::ZERO);
    assert_eq!(t.zoom_index(), 4);
    assert!(t.flipped());
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn prop_zoom_index_stays_in_bounds(deltas in prop::collection::vec(-500.0f32..500.0, 0..200)) {
        let levels = levels();
        let mut t = ViewTransform::new(&levels);
        for d in deltas {
            t.wheel(d, &levels);
            prop_assert!(t.zoom_index() <= levels.last_index());
        }
    }

    #[test]
    fn prop_flip_twice_is_identity(flips in 0usize..20) {
        let levels = levels();
        let mut t = ViewTransform::new(&levels);
        let before = t.clone();
        for _ in 0..flips {
            t.toggle_flip();
        }
        prop_assert_eq!(t.flipped(), flips % 2 == 1);
        t.toggle_flip();
        t.toggle_flip();
        prop_assert_eq!(t.flipped(), flips % 2 == 1);
        if flips % 2 == 0 {
            prop_assert_eq!(t, before);
        }
    }
}
