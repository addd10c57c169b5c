use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use image::{Rgba, RgbaImage};
use proptest::prelude::*;

use imgeval_core::loader::ImageSlot;
use imgeval_core::transform::Point;
use imgeval_core::viewport::{clamp_axis, place, render_view, Pane, ResizeDebouncer, Size};

// ---------------------------------------------------------------------------
// Clamping
// ---------------------------------------------------------------------------

#[test]
fn test_clamp_axis_image_larger_than_container() {
    assert_relative_eq!(clamp_axis(-50.0, 100.0, 200.0), -50.0);
    assert_relative_eq!(clamp_axis(-150.0, 100.0, 200.0), -100.0);
    assert_relative_eq!(clamp_axis(30.0, 100.0, 200.0), 0.0);
}

#[test]
fn test_clamp_axis_image_smaller_than_container_pins_to_zero() {
    assert_relative_eq!(clamp_axis(-20.0, 100.0, 50.0), 0.0);
    assert_relative_eq!(clamp_axis(20.0, 100.0, 50.0), 0.0);
}

#[test]
fn test_place_scales_and_clamps() {
    let p = place(
        Size::new(100.0, 50.0),
        2.0,
        Point::new(-500.0, -10.0),
        Size::new(80.0, 80.0),
    );
    assert_relative_eq!(p.size.width, 200.0);
    assert_relative_eq!(p.size.height, 100.0);
    assert_relative_eq!(p.offset.x, -120.0);
    assert_relative_eq!(p.offset.y, -10.0);
}

proptest! {
    #[test]
    fn prop_clamped_offset_in_range(
        offset in -5000.0f32..5000.0,
        container in 1.0f32..2000.0,
        scaled in 1.0f32..4000.0,
    ) {
        let o = clamp_axis(offset, container, scaled);
        if scaled >= container {
            prop_assert!(o <= 0.0);
            prop_assert!(o >= container - scaled);
        } else {
            prop_assert_eq!(o, 0.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn quadrants() -> RgbaImage {
    RgbaImage::from_fn(2, 2, |x, y| match (x, y) {
        (0, 0) => Rgba([255, 0, 0, 255]),
        (1, 0) => Rgba([0, 255, 0, 255]),
        (0, 1) => Rgba([0, 0, 255, 255]),
        _ => Rgba([255, 255, 255, 255]),
    })
}

#[test]
fn test_render_view_nearest_neighbour_upscale() {
    let out = render_view(&quadrants(), 2.0, Point::ZERO, 4, 4);
    assert_eq!(out.get_pixel(0, 0), &Rgba([255, 0, 0, 255]));
    assert_eq!(out.get_pixel(1, 1), &Rgba([255, 0, 0, 255]));
    assert_eq!(out.get_pixel(2, 0), &Rgba([0, 255, 0, 255]));
    assert_eq!(out.get_pixel(3, 3), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_render_view_leaves_uncovered_area_transparent() {
    let out = render_view(&quadrants(), 1.0, Point::ZERO, 4, 4);
    assert_eq!(out.get_pixel(1, 1), &Rgba([255, 255, 255, 255]));
    assert_eq!(out.get_pixel(3, 3), &Rgba([0, 0, 0, 0]));
}

#[test]
fn test_render_view_applies_clamped_pan() {
    // Scaled 4x4 in a 2x2 container: pan may reach -2 on each axis.
    let out = render_view(&quadrants(), 2.0, Point::new(-100.0, -100.0), 2, 2);
    assert_eq!(out.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
}

// ---------------------------------------------------------------------------
// Panes
// ---------------------------------------------------------------------------

#[test]
fn test_flip_swaps_left_and_right_sources() {
    assert_eq!(Pane::Left.source(false), ImageSlot::A);
    assert_eq!(Pane::Right.source(false), ImageSlot::B);
    assert_eq!(Pane::Left.source(true), ImageSlot::B);
    assert_eq!(Pane::Right.source(true), ImageSlot::A);
    assert_eq!(Pane::Diff.source(true), ImageSlot::Diff);
    assert_eq!(Pane::Left.label(true), "Image B");
}

// ---------------------------------------------------------------------------
// Resize debounce
// ---------------------------------------------------------------------------

#[test]
fn test_debouncer_commits_first_size_immediately() {
    let mut d = ResizeDebouncer::default();
    let now = Instant::now();
    assert!(d.observe(Size::new(100.0, 100.0), now));
    assert_eq!(d.committed(), Some(Size::new(100.0, 100.0)));
    assert!(!d.is_pending());
}

#[test]
fn test_debouncer_fires_once_with_last_size() {
    let mut d = ResizeDebouncer::new(Duration::from_millis(30));
    let t0 = Instant::now();
    d.observe(Size::new(100.0, 100.0), t0);

    d.observe(Size::new(110.0, 100.0), t0);
    d.observe(Size::new(120.0, 100.0), t0 + Duration::from_millis(10));
    d.observe(Size::new(130.0, 100.0), t0 + Duration::from_millis(20));

    assert_eq!(d.poll(t0 + Duration::from_millis(40)), None);
    assert_eq!(
        d.poll(t0 + Duration::from_millis(50)),
        Some(Size::new(130.0, 100.0))
    );
    assert_eq!(d.poll(t0 + Duration::from_millis(100)), None);
    assert_eq!(d.committed(), Some(Size::new(130.0, 100.0)));
}

#[test]
fn test_debouncer_ignores_unchanged_size() {
    let mut d = ResizeDebouncer::default();
    let t0 = Instant::now();
    d.observe(Size::new(50.0, 50.0), t0);
    assert!(!d.observe(Size::new(50.0, 50.0), t0 + Duration::from_millis(5)));
    assert!(!d.is_pending());
}

#[test]
fn test_debouncer_remaining_counts_down() {
    let mut d = ResizeDebouncer::new(Duration::from_millis(30));
    let t0 = Instant::now();
    d.observe(Size::new(1.0, 1.0), t0);
    d.observe(Size::new(2.0, 1.0), t0);
    assert_eq!(
        d.remaining(t0 + Duration::from_millis(10)),
        Some(Duration::from_millis(20))
    );
}
