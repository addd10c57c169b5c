use imgeval_core::model::ScoreAxis;
use imgeval_core::panel::{slider_marks, MarkGlyph, ScorePanel};
use imgeval_core::transform::Point;

#[test]
fn test_panel_starts_hidden_at_default_position() {
    let panel = ScorePanel::default();
    assert!(!panel.is_visible());
    assert_eq!(panel.position(), Point::new(100.0, 100.0));
}

#[test]
fn test_drag_keeps_grab_offset() {
    let mut panel = ScorePanel::new();
    panel.begin_drag(Point::new(110.0, 105.0));
    assert!(panel.drag_to(Point::new(210.0, 305.0)));
    assert_eq!(panel.position(), Point::new(200.0, 300.0));
    panel.end_drag();
    assert!(!panel.drag_to(Point::new(0.0, 0.0)));
    assert_eq!(panel.position(), Point::new(200.0, 300.0));
}

#[test]
fn test_hide_releases_drag() {
    let mut panel = ScorePanel::new();
    panel.toggle();
    assert!(panel.is_visible());
    panel.begin_drag(Point::ZERO);
    panel.toggle();
    assert!(!panel.is_visible());
    assert!(!panel.is_dragging());
}

#[test]
fn test_slider_marks_for_step_five() {
    let axis = ScoreAxis::new("sharpness", "Sharpness", 5);
    let marks = slider_marks(&axis, Some(1));
    let values: Vec<i32> = marks.iter().map(|m| m.value).collect();
    assert_eq!(values, vec![-2, -1, 0, 1, 2]);
    assert_eq!(marks[0].glyph, MarkGlyph::Strong);
    assert_eq!(marks[1].glyph, MarkGlyph::Slight);
    assert_eq!(marks[2].glyph, MarkGlyph::Neutral);
    assert!(marks[3].active);
    assert_eq!(marks.iter().filter(|m| m.active).count(), 1);
}

#[test]
fn test_slider_marks_even_step() {
    // Mirrors the dashboard: i - half for i in 0..step, so +half is absent.
    let axis = ScoreAxis::new("color", "Color", 4);
    let values: Vec<i32> = slider_marks(&axis, None).iter().map(|m| m.value).collect();
    assert_eq!(values, vec![-2, -1, 0, 1]);
}
