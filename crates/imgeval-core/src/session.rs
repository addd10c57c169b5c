//! Comparison session: the state behind one open template.
//!
//! The session performs no I/O. It decides what must be loaded or saved and
//! hands back plain requests ([`LoadBatch`], [`EvaluationRecord`]); the
//! caller runs them and feeds the results back in on the UI thread.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::{EvalError, Result};
use crate::loader::{
    Bitmap, ImageSlot, ImageSource, LoadBarrier, LoadBatch, LoadCompletion, LoadRequest,
    RenderPolicy,
};
use crate::model::{ImagePair, ScoreAxis, TemplateDetail, Threshold, ZoomLevels};
use crate::scores::{EvaluationRecord, SavedResults, ScoreMap};
use crate::transform::{ViewEvent, ViewTransform};
use crate::viewport::Pane;

/// What a pane's image slot currently holds.
#[derive(Debug, Default)]
pub enum SlotState {
    #[default]
    Empty,
    Loading,
    Ready(Bitmap),
    Failed(String),
}

impl SlotState {
    pub fn bitmap(&self) -> Option<&Bitmap> {
        match self {
            SlotState::Ready(bitmap) => Some(bitmap),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SlotState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SlotState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Session {
    template_id: Option<String>,
    pairs: Vec<ImagePair>,
    axes: Vec<ScoreAxis>,
    selected: usize,
    threshold: Threshold,
    scores: ScoreMap,
    zoom_levels: ZoomLevels,
    transform: ViewTransform,
    epoch: u64,
    slots: [SlotState; 3],
    policy: RenderPolicy,
    barrier: LoadBarrier,
    pending_prior: Option<SavedResults>,
    detail_loaded: bool,
    detail_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(RenderPolicy::default(), Threshold::default())
    }
}

impl Session {
    pub fn new(policy: RenderPolicy, threshold: Threshold) -> Self {
        let zoom_levels = ZoomLevels::fallback();
        Self {
            template_id: None,
            pairs: Vec::new(),
            axes: Vec::new(),
            selected: 0,
            threshold,
            scores: ScoreMap::new(),
            transform: ViewTransform::new(&zoom_levels),
            zoom_levels,
            epoch: 0,
            slots: Default::default(),
            policy,
            barrier: LoadBarrier::default(),
            pending_prior: None,
            detail_loaded: false,
            detail_error: None,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn template_id(&self) -> Option<&str> {
        self.template_id.as_deref()
    }

    pub fn pairs(&self) -> &[ImagePair] {
        &self.pairs
    }

    pub fn axes(&self) -> &[ScoreAxis] {
        &self.axes
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_pair(&self) -> Option<&ImagePair> {
        self.pairs.get(self.selected)
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn scores(&self) -> &ScoreMap {
        &self.scores
    }

    pub fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    pub fn zoom_levels(&self) -> &ZoomLevels {
        &self.zoom_levels
    }

    pub fn zoom(&self) -> f32 {
        self.transform.zoom(&self.zoom_levels)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn policy(&self) -> RenderPolicy {
        self.policy
    }

    /// Takes effect for completions accepted from now on.
    pub fn set_policy(&mut self, policy: RenderPolicy) {
        self.policy = policy;
    }

    pub fn is_detail_loaded(&self) -> bool {
        self.detail_loaded
    }

    /// Why the open template's detail could not be fetched, if it failed.
    pub fn detail_error(&self) -> Option<&str> {
        self.detail_error.as_deref()
    }

    pub fn slot(&self, slot: ImageSlot) -> &SlotState {
        &self.slots[slot.index()]
    }

    pub fn pending_prior(&self) -> Option<&SavedResults> {
        self.pending_prior.as_ref()
    }

    // ------------------------------------------------------------------
    // Template lifecycle
    // ------------------------------------------------------------------

    /// Switch to another template. Everything tied to the previous one is
    /// dropped and in-flight loads become stale. The caller then requests the
    /// template detail and any prior evaluation.
    pub fn open_template(&mut self, template_id: impl Into<String>) {
        let template_id = template_id.into();
        info!(%template_id, "Opening template");
        self.template_id = Some(template_id);
        self.pairs.clear();
        self.axes.clear();
        self.selected = 0;
        self.scores.clear();
        self.pending_prior = None;
        self.detail_loaded = false;
        self.detail_error = None;
        self.transform.reset_pan();
        self.epoch += 1;
        self.slots = Default::default();
        self.barrier.reset(0);
    }

    /// Install fetched pairs and axes. Returns the loads for the first pair,
    /// or `None` if the detail belongs to a template no longer open or has
    /// no pairs.
    pub fn apply_detail(&mut self, template_id: &str, detail: TemplateDetail) -> Option<LoadBatch> {
        if self.template_id.as_deref() != Some(template_id) {
            debug!(template_id, "Discarding detail for a template no longer open");
            return None;
        }
        self.pairs = detail.image_pairs;
        self.axes = detail.axes;
        self.selected = 0;
        self.detail_loaded = true;
        self.detail_error = None;
        self.transform.reset_pan();

        if let Some(ref results) = self.pending_prior {
            debug!(saved = results.len(), "Prior scores waiting for confirmation");
        }
        if self.pairs.is_empty() {
            warn!(template_id, "Template has no image pairs");
            return None;
        }
        Some(self.issue(&ImageSlot::ALL))
    }

    /// Record a failed detail fetch for the open template. Returns `false`
    /// when the failure belongs to a template no longer open.
    pub fn detail_failed(&mut self, template_id: &str, message: String) -> bool {
        if self.template_id.as_deref() != Some(template_id) || self.detail_loaded {
            return false;
        }
        warn!(template_id, "Template detail failed: {message}");
        self.detail_error = Some(message);
        true
    }

    /// Hold previously saved scores until the user confirms loading them.
    pub fn offer_prior(&mut self, template_id: &str, results: Option<SavedResults>) {
        if self.template_id.as_deref() != Some(template_id) {
            return;
        }
        match results {
            Some(results) if !results.is_empty() => {
                info!(template_id, pairs = results.len(), "Found a saved evaluation");
                self.pending_prior = Some(results);
            }
            _ => self.pending_prior = None,
        }
    }

    /// Replace the score map with the pending saved scores. Returns how many
    /// pairs received scores. Until the detail arrives there is nothing to
    /// hydrate, so the saved scores stay pending.
    pub fn confirm_prior(&mut self) -> usize {
        if !self.detail_loaded {
            debug!("Saved scores kept pending until the template detail arrives");
            return 0;
        }
        let Some(results) = self.pending_prior.take() else {
            return 0;
        };
        self.scores = ScoreMap::from_results(&results, &self.pairs, &self.axes);
        let hydrated = self.scores.scored_pairs();
        info!(hydrated, "Loaded saved scores");
        hydrated
    }

    /// Drop any pending saved scores because the evaluator changed. Returns
    /// the open template so the caller can fetch that user's scores.
    pub fn reset_prior(&mut self) -> Option<&str> {
        self.pending_prior = None;
        self.template_id.as_deref()
    }

    pub fn decline_prior(&mut self) {
        if self.pending_prior.take().is_some() {
            debug!("Saved scores declined");
        }
    }

    // ------------------------------------------------------------------
    // Selection, threshold, zoom levels
    // ------------------------------------------------------------------

    /// Select another pair. Pan resets; zoom and flip carry over.
    /// Re-selecting the current pair only reloads when a slot failed.
    pub fn select(&mut self, index: usize) -> Result<Option<LoadBatch>> {
        if index >= self.pairs.len() {
            return Err(EvalError::PairIndexOutOfRange {
                index,
                total: self.pairs.len(),
            });
        }
        if index == self.selected
            && self.detail_loaded
            && !self.all_slots_empty()
            && !self.any_slot_failed()
        {
            return Ok(None);
        }
        self.selected = index;
        self.transform.reset_pan();
        debug!(index, "Selected pair");
        Ok(Some(self.issue(&ImageSlot::ALL)))
    }

    /// Apply a threshold typed by the user. Values outside `0..=255` are
    /// ignored and the last valid threshold stays in effect.
    pub fn set_threshold(&mut self, value: i64) -> Option<LoadBatch> {
        let threshold = match Threshold::try_from(value) {
            Ok(t) => t,
            Err(e) => {
                debug!("Ignoring threshold input: {e}");
                return None;
            }
        };
        if threshold == self.threshold {
            return None;
        }
        self.threshold = threshold;
        self.selected_pair()?;

        // A and B are only reloaded if they never arrived under the old epoch.
        let mut slots = vec![ImageSlot::Diff];
        for slot in [ImageSlot::A, ImageSlot::B] {
            if self.slot(slot).bitmap().is_none() {
                slots.push(slot);
            }
        }
        Some(self.issue(&slots))
    }

    /// Install fetched zoom levels, or the defaults if the fetch failed.
    pub fn set_zoom_levels(&mut self, fetched: Option<Vec<f32>>) {
        self.zoom_levels = ZoomLevels::or_fallback(fetched);
        let index = self.zoom_levels.default_index();
        self.transform.set_zoom_index(index, &self.zoom_levels);
    }

    pub fn set_zoom_index(&mut self, index: usize) {
        self.transform.set_zoom_index(index, &self.zoom_levels);
    }

    /// Route pane input into the shared transform.
    pub fn apply_view_event(&mut self, event: ViewEvent) -> bool {
        self.transform.apply(event, &self.zoom_levels)
    }

    // ------------------------------------------------------------------
    // Image loads
    // ------------------------------------------------------------------

    fn all_slots_empty(&self) -> bool {
        self.slots.iter().all(|s| matches!(s, SlotState::Empty))
    }

    fn any_slot_failed(&self) -> bool {
        self.slots.iter().any(|s| s.error().is_some())
    }

    fn issue(&mut self, slots: &[ImageSlot]) -> LoadBatch {
        self.epoch += 1;
        let epoch = self.epoch;
        let template_id = self.template_id.clone().unwrap_or_default();
        let pair = self.pairs[self.selected].clone();

        let requests: Vec<LoadRequest> = slots
            .iter()
            .map(|&slot| {
                self.slots[slot.index()] = SlotState::Loading;
                let source = match slot {
                    ImageSlot::A => ImageSource::Original {
                        template_id: template_id.clone(),
                        filename: pair.a.clone(),
                    },
                    ImageSlot::B => ImageSource::Original {
                        template_id: template_id.clone(),
                        filename: pair.b.clone(),
                    },
                    ImageSlot::Diff => ImageSource::Diff {
                        template_id: template_id.clone(),
                        img1: pair.a.clone(),
                        img2: pair.b.clone(),
                        threshold: self.threshold,
                    },
                };
                LoadRequest { slot, source }
            })
            .collect();

        self.barrier.reset(requests.len());
        debug!(epoch, count = requests.len(), "Issued load batch");
        LoadBatch { epoch, requests }
    }

    /// Take in a finished load. Stale completions (from an earlier epoch) are
    /// dropped. Returns the slots whose display changed and must be redrawn.
    pub fn accept(&mut self, completion: LoadCompletion) -> Vec<ImageSlot> {
        if completion.epoch != self.epoch {
            debug!(
                got = completion.epoch,
                current = self.epoch,
                slot = %completion.slot,
                "Discarding stale image"
            );
            return Vec::new();
        }

        let slot = completion.slot;
        if !self.slots[slot.index()].is_loading() {
            debug!(%slot, "Ignoring duplicate completion");
            return Vec::new();
        }
        self.slots[slot.index()] = match completion.result {
            Ok(bitmap) => SlotState::Ready(bitmap),
            Err(e) => SlotState::Failed(e.to_string()),
        };

        let batch_done = self.barrier.arrive();
        match self.policy {
            RenderPolicy::Independent => vec![slot],
            RenderPolicy::WaitForAll if batch_done => ImageSlot::ALL.to_vec(),
            RenderPolicy::WaitForAll => Vec::new(),
        }
    }

    /// Whether a slot may be shown under the active render policy.
    pub fn is_displayable(&self, slot: ImageSlot) -> bool {
        let released = match self.policy {
            RenderPolicy::Independent => true,
            RenderPolicy::WaitForAll => self.barrier.is_open(),
        };
        released && !self.slot(slot).is_loading()
    }

    pub fn displayed_bitmap(&self, slot: ImageSlot) -> Option<&Bitmap> {
        if !self.is_displayable(slot) {
            return None;
        }
        self.slot(slot).bitmap()
    }

    /// Bitmap for a pane, honouring the flip.
    pub fn pane_bitmap(&self, pane: Pane) -> Option<&Bitmap> {
        self.displayed_bitmap(pane.source(self.transform.flipped()))
    }

    // ------------------------------------------------------------------
    // Scores
    // ------------------------------------------------------------------

    /// Slider callback for the selected pair. Returns the stored (clamped) value.
    pub fn set_score(&mut self, axis_id: &str, value: i32) -> Result<i32> {
        if self.selected_pair().is_none() {
            return Err(EvalError::PairIndexOutOfRange {
                index: self.selected,
                total: self.pairs.len(),
            });
        }
        let axis = self
            .axes
            .iter()
            .find(|a| a.id == axis_id)
            .ok_or_else(|| EvalError::UnknownAxis(axis_id.to_string()))?;
        Ok(self.scores.set(self.selected, axis, value))
    }

    /// Score of the selected pair on one axis, if set.
    pub fn score(&self, axis_id: &str) -> Option<i32> {
        self.scores.get(self.selected, axis_id)
    }

    /// Build the save request for the whole score map.
    pub fn save_payload(&self, user_id: &str, now: DateTime<Utc>) -> Result<EvaluationRecord> {
        let template_id = self.template_id.as_deref().ok_or(EvalError::NoTemplate)?;
        Ok(EvaluationRecord::new(
            template_id,
            user_id,
            now,
            self.scores.to_results(&self.pairs),
        ))
    }
}
