use crate::consts::DEFAULT_PANEL_POSITION;
use crate::model::ScoreAxis;
use crate::transform::Point;

/// Floating scoring panel: position, drag state and visibility.
///
/// The panel's drag is independent of the image transform.
#[derive(Clone, Debug, PartialEq)]
pub struct ScorePanel {
    position: Point,
    grab: Option<Point>,
    visible: bool,
}

impl Default for ScorePanel {
    fn default() -> Self {
        let (x, y) = DEFAULT_PANEL_POSITION;
        Self {
            position: Point::new(x, y),
            grab: None,
            visible: false,
        }
    }
}

impl ScorePanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    /// Pointer pressed on the drag handle.
    pub fn begin_drag(&mut self, pointer: Point) {
        self.grab = Some(pointer - self.position);
    }

    /// Follow the pointer while dragging. Returns whether the panel moved.
    pub fn drag_to(&mut self, pointer: Point) -> bool {
        let Some(grab) = self.grab else {
            return false;
        };
        let next = pointer - grab;
        let moved = next != self.position;
        self.position = next;
        moved
    }

    /// Pointer released, left the window, or focus was lost.
    pub fn end_drag(&mut self) {
        self.grab = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.grab.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.grab = None;
    }

    pub fn toggle(&mut self) {
        if self.visible {
            self.hide();
        } else {
            self.show();
        }
    }
}

/// Glyph drawn under a slider tick, chosen by distance from zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkGlyph {
    Neutral,
    Slight,
    Strong,
}

impl MarkGlyph {
    pub fn for_value(value: i32) -> Self {
        match value.unsigned_abs() {
            0 => MarkGlyph::Neutral,
            1 => MarkGlyph::Slight,
            _ => MarkGlyph::Strong,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MarkGlyph::Neutral => "○",
            MarkGlyph::Slight => "◐",
            MarkGlyph::Strong => "●",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SliderMark {
    pub value: i32,
    pub glyph: MarkGlyph,
    pub active: bool,
}

/// One tick per step: `value = i - half` for `i in 0..step`.
pub fn slider_marks(axis: &ScoreAxis, current: Option<i32>) -> Vec<SliderMark> {
    let half = axis.half();
    (0..axis.step as i32)
        .map(|i| {
            let value = i - half;
            SliderMark {
                value,
                glyph: MarkGlyph::for_value(value),
                active: current == Some(value),
            }
        })
        .collect()
}

/// What the panel asks the session to do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelAction {
    ScoreChanged { axis_id: String, value: i32 },
    Save,
}
