use std::time::Duration;

use imgeval_core::diff::DiffLegend;
use imgeval_core::loader::ImageSlot;
use imgeval_core::viewport::ResizeDebouncer;

/// Textures and per-pane layout state of the comparison view.
pub struct ViewportState {
    /// Indexed by [`ImageSlot::index`].
    pub textures: [Option<egui::TextureHandle>; 3],
    /// Indexed by `Pane::index`.
    pub debouncers: [ResizeDebouncer; 3],
    pub legend: Option<DiffLegend>,
}

impl ViewportState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            textures: Default::default(),
            debouncers: std::array::from_fn(|_| ResizeDebouncer::new(debounce)),
            legend: None,
        }
    }

    pub fn texture(&self, slot: ImageSlot) -> Option<&egui::TextureHandle> {
        self.textures[slot.index()].as_ref()
    }

    pub fn clear(&mut self, slot: ImageSlot) {
        self.textures[slot.index()] = None;
        if slot == ImageSlot::Diff {
            self.legend = None;
        }
    }

    pub fn clear_all(&mut self) {
        for slot in ImageSlot::ALL {
            self.clear(slot);
        }
    }
}
