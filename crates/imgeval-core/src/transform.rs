use std::ops::{Add, AddAssign, Sub};

use tracing::debug;

use crate::model::ZoomLevels;

/// A position or displacement in canvas pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

/// Input routed from any of the three panes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    PointerLeave,
    /// Wheel delta in browser convention: negative `delta_y` scrolls up.
    Wheel { delta_y: f32 },
    ToggleFlip,
}

/// Pan, zoom and flip state shared by the left, right and diff panes.
///
/// The pan offset is stored unclamped; each pane clamps it against its own
/// image and container when placing the bitmap (see [`crate::viewport::place`]).
#[derive(Clone, Debug, PartialEq)]
pub struct ViewTransform {
    zoom_index: usize,
    pan: Point,
    flipped: bool,
    dragging: bool,
    last_point: Point,
}

impl ViewTransform {
    pub fn new(levels: &ZoomLevels) -> Self {
        Self {
            zoom_index: levels.default_index(),
            pan: Point::ZERO,
            flipped: false,
            dragging: false,
            last_point: Point::ZERO,
        }
    }

    pub fn zoom_index(&self) -> usize {
        self.zoom_index
    }

    pub fn zoom(&self, levels: &ZoomLevels) -> f32 {
        levels.get(self.zoom_index)
    }

    pub fn pan(&self) -> Point {
        self.pan
    }

    pub fn flipped(&self) -> bool {
        self.flipped
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    /// Apply one input event. Returns `true` when anything visible changed.
    pub fn apply(&mut self, event: ViewEvent, levels: &ZoomLevels) -> bool {
        match event {
            ViewEvent::PointerDown(p) => {
                self.pointer_down(p);
                false
            }
            ViewEvent::PointerMove(p) => self.pointer_move(p),
            ViewEvent::PointerUp | ViewEvent::PointerLeave => {
                self.pointer_up();
                false
            }
            ViewEvent::Wheel { delta_y } => self.wheel(delta_y, levels),
            ViewEvent::ToggleFlip => {
                self.toggle_flip();
                true
            }
        }
    }

    pub fn pointer_down(&mut self, point: Point) {
        self.dragging = true;
        self.last_point = point;
    }

    /// Pan by the distance moved since the previous pointer position.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if !self.dragging {
            return false;
        }
        let delta = point - self.last_point;
        self.last_point = point;
        if delta == Point::ZERO {
            return false;
        }
        self.pan += delta;
        true
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Step one zoom level: scrolling up zooms in. Stays inside the list.
    pub fn wheel(&mut self, delta_y: f32, levels: &ZoomLevels) -> bool {
        let previous = self.zoom_index;
        if delta_y < 0.0 {
            self.zoom_index = (self.zoom_index + 1).min(levels.last_index());
        } else if delta_y > 0.0 {
            self.zoom_index = self.zoom_index.saturating_sub(1);
        }
        if self.zoom_index != previous {
            debug!(
                from = previous,
                to = self.zoom_index,
                zoom = levels.get(self.zoom_index),
                "zoom step"
            );
        }
        self.zoom_index != previous
    }

    pub fn toggle_flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn reset_pan(&mut self) {
        self.pan = Point::ZERO;
    }

    /// Jump to a level (e.g. from a zoom selector), clamped to the list.
    pub fn set_zoom_index(&mut self, index: usize, levels: &ZoomLevels) {
        self.zoom_index = index.min(levels.last_index());
    }
}
