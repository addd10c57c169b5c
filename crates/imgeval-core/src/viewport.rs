use std::fmt;
use std::time::{Duration, Instant};

use image::RgbaImage;

use crate::consts::RESIZE_DEBOUNCE_MS;
use crate::loader::ImageSlot;
use crate::transform::Point;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Where a scaled bitmap lands inside its container, relative to the
/// container's top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub offset: Point,
    pub size: Size,
}

/// Keep the image covering the container edge nearest the origin.
///
/// Images larger than the container may move within
/// `[container - scaled, 0]`; smaller ones are pinned at 0.
pub fn clamp_axis(offset: f32, container: f32, scaled: f32) -> f32 {
    offset.max(container - scaled).min(0.0)
}

/// Placement of a bitmap of `intrinsic` size at `zoom` with the shared pan
/// offset, inside a container of the given size.
pub fn place(intrinsic: Size, zoom: f32, pan: Point, container: Size) -> Placement {
    let size = intrinsic.scaled(zoom);
    Placement {
        offset: Point::new(
            clamp_axis(pan.x, container.width, size.width),
            clamp_axis(pan.y, container.height, size.height),
        ),
        size,
    }
}

/// Rasterize a pane the way the compare canvas draws it: a surface the size
/// of the container, cleared to transparent, with the bitmap drawn at its
/// clamped placement using nearest-neighbour sampling.
pub fn render_view(
    bitmap: &RgbaImage,
    zoom: f32,
    pan: Point,
    container_width: u32,
    container_height: u32,
) -> RgbaImage {
    let (src_w, src_h) = bitmap.dimensions();
    let mut surface = RgbaImage::new(container_width, container_height);
    if src_w == 0 || src_h == 0 || zoom <= 0.0 {
        return surface;
    }

    let placement = place(
        Size::new(src_w as f32, src_h as f32),
        zoom,
        pan,
        Size::new(container_width as f32, container_height as f32),
    );

    for y in 0..container_height {
        let v = (y as f32 + 0.5 - placement.offset.y) / zoom;
        if v < 0.0 || v >= src_h as f32 {
            continue;
        }
        let sy = v as u32;
        for x in 0..container_width {
            let u = (x as f32 + 0.5 - placement.offset.x) / zoom;
            if u < 0.0 || u >= src_w as f32 {
                continue;
            }
            surface.put_pixel(x, y, *bitmap.get_pixel(u as u32, sy));
        }
    }

    surface
}

/// The three side-by-side panes of the comparison view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pane {
    Left,
    Right,
    Diff,
}

impl Pane {
    pub const ALL: [Pane; 3] = [Pane::Left, Pane::Right, Pane::Diff];

    /// Which loaded image this pane shows. Flipping swaps A and B between
    /// the left and right panes without reloading anything.
    pub fn source(self, flipped: bool) -> ImageSlot {
        match (self, flipped) {
            (Pane::Left, false) | (Pane::Right, true) => ImageSlot::A,
            (Pane::Right, false) | (Pane::Left, true) => ImageSlot::B,
            (Pane::Diff, _) => ImageSlot::Diff,
        }
    }

    pub fn label(self, flipped: bool) -> &'static str {
        match self.source(flipped) {
            ImageSlot::A => "Image A",
            ImageSlot::B => "Image B",
            ImageSlot::Diff => "Diff",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Pane::Left => 0,
            Pane::Right => 1,
            Pane::Diff => 2,
        }
    }
}

impl fmt::Display for Pane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pane::Left => write!(f, "Left"),
            Pane::Right => write!(f, "Right"),
            Pane::Diff => write!(f, "Diff"),
        }
    }
}

/// Trailing-edge debounce for container resizes.
///
/// The first observed size is committed immediately. Later changes restart
/// the timer; only the last size seen before a quiet period is committed.
#[derive(Clone, Debug)]
pub struct ResizeDebouncer {
    delay: Duration,
    committed: Option<Size>,
    pending: Option<(Size, Instant)>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(Duration::from_millis(RESIZE_DEBOUNCE_MS))
    }
}

impl ResizeDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            committed: None,
            pending: None,
        }
    }

    /// Report the container's current size. Returns `true` if this counted as
    /// a resize event (the size differs from the last one seen).
    pub fn observe(&mut self, size: Size, now: Instant) -> bool {
        let Some(committed) = self.committed else {
            self.committed = Some(size);
            return true;
        };

        let latest = self.pending.map(|(s, _)| s).unwrap_or(committed);
        if latest == size {
            return false;
        }
        self.pending = Some((size, now));
        true
    }

    /// Commit the pending size once the quiet period has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<Size> {
        let (size, since) = self.pending?;
        if now.saturating_duration_since(since) < self.delay {
            return None;
        }
        self.pending = None;
        self.committed = Some(size);
        Some(size)
    }

    /// Time left before the pending redraw fires.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|(_, since)| self.delay.saturating_sub(now.saturating_duration_since(since)))
    }

    /// Size the pane currently draws at.
    pub fn committed(&self) -> Option<Size> {
        self.committed
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
