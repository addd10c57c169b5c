use std::fmt;
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::Backend;
use crate::error::{EvalError, Result};
use crate::model::Threshold;
use crate::viewport::Size;

/// Which of the three images of a comparison a load feeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageSlot {
    A,
    B,
    Diff,
}

impl ImageSlot {
    pub const ALL: [ImageSlot; 3] = [ImageSlot::A, ImageSlot::B, ImageSlot::Diff];

    pub fn index(self) -> usize {
        match self {
            ImageSlot::A => 0,
            ImageSlot::B => 1,
            ImageSlot::Diff => 2,
        }
    }
}

impl fmt::Display for ImageSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSlot::A => write!(f, "A"),
            ImageSlot::B => write!(f, "B"),
            ImageSlot::Diff => write!(f, "Diff"),
        }
    }
}

/// Where a slot's bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    Original {
        template_id: String,
        filename: String,
    },
    Diff {
        template_id: String,
        img1: String,
        img2: String,
        threshold: Threshold,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadRequest {
    pub slot: ImageSlot,
    pub source: ImageSource,
}

/// Loads issued together, tagged with the session epoch they belong to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadBatch {
    pub epoch: u64,
    pub requests: Vec<LoadRequest>,
}

impl LoadBatch {
    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }

    pub fn slots(&self) -> impl Iterator<Item = ImageSlot> + '_ {
        self.requests.iter().map(|r| r.slot)
    }
}

/// A decoded RGBA image. Each load produces a fresh, exclusively owned one.
#[derive(Debug)]
pub struct Bitmap {
    image: RgbaImage,
}

impl Bitmap {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> Size {
        Size::new(self.image.width() as f32, self.image.height() as f32)
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Decode image bytes in any format the `image` crate recognises.
pub fn decode_bitmap(bytes: &[u8]) -> Result<Bitmap> {
    if bytes.is_empty() {
        return Err(EvalError::Decode("empty response body".into()));
    }
    let image = image::load_from_memory(bytes).map_err(|e| EvalError::Decode(e.to_string()))?;
    Ok(Bitmap::new(image.to_rgba8()))
}

/// Fetch and decode one image, blocking the calling thread.
pub fn load_bitmap(backend: &dyn Backend, source: &ImageSource) -> Result<Bitmap> {
    let bytes = match source {
        ImageSource::Original {
            template_id,
            filename,
        } => backend.get_image(template_id, filename)?,
        ImageSource::Diff {
            template_id,
            img1,
            img2,
            threshold,
        } => backend.diff_image(template_id, img1, img2, *threshold)?,
    };
    decode_bitmap(&bytes)
}

/// Result of one load, delivered exactly once per request.
#[derive(Debug)]
pub struct LoadCompletion {
    pub epoch: u64,
    pub slot: ImageSlot,
    pub result: Result<Bitmap>,
}

/// Start every load of `batch` on the rayon pool.
///
/// `on_complete` runs once per request, on a pool thread, in whatever order
/// the loads finish.
pub fn spawn_batch<F>(backend: Arc<dyn Backend>, batch: LoadBatch, on_complete: F)
where
    F: Fn(LoadCompletion) + Send + Sync + 'static,
{
    let on_complete = Arc::new(on_complete);
    let epoch = batch.epoch;
    debug!(epoch, count = batch.len(), "Spawning image loads");

    for request in batch.requests {
        let backend = Arc::clone(&backend);
        let on_complete = Arc::clone(&on_complete);
        rayon::spawn(move || {
            let result = load_bitmap(backend.as_ref(), &request.source);
            if let Err(ref e) = result {
                warn!(epoch, slot = %request.slot, "Image load failed: {e}");
            }
            on_complete(LoadCompletion {
                epoch,
                slot: request.slot,
                result,
            });
        });
    }
}

/// How completions turn into redraws.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderPolicy {
    /// Each completion redraws only the pane it feeds.
    #[default]
    Independent,
    /// Hold all redraws until every load of the batch has completed.
    WaitForAll,
}

impl fmt::Display for RenderPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderPolicy::Independent => write!(f, "Independent"),
            RenderPolicy::WaitForAll => write!(f, "Wait for all"),
        }
    }
}

/// Completion counter for [`RenderPolicy::WaitForAll`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadBarrier {
    expected: usize,
    arrived: usize,
}

impl LoadBarrier {
    pub fn new(expected: usize) -> Self {
        Self {
            expected,
            arrived: 0,
        }
    }

    pub fn reset(&mut self, expected: usize) {
        self.expected = expected;
        self.arrived = 0;
    }

    /// Count one completion. Returns `true` exactly once: on the arrival
    /// that completes the batch.
    pub fn arrive(&mut self) -> bool {
        if self.arrived >= self.expected {
            return false;
        }
        self.arrived += 1;
        self.arrived == self.expected
    }

    pub fn is_open(&self) -> bool {
        self.arrived >= self.expected
    }

    pub fn arrived(&self) -> usize {
        self.arrived
    }
}
