use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{ImagePair, ScoreAxis};

/// Axis id → score.
pub type AxisScores = BTreeMap<String, i32>;

/// Persisted form: A-filename → axis id → score.
pub type SavedResults = BTreeMap<String, AxisScores>;

/// Scores for the current session, keyed by pair position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScoreMap {
    by_pair: BTreeMap<usize, AxisScores>,
}

impl ScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a slider value, clamped to the axis range. Returns the stored value.
    pub fn set(&mut self, pair: usize, axis: &ScoreAxis, value: i32) -> i32 {
        let value = axis.clamp(value);
        self.by_pair
            .entry(pair)
            .or_default()
            .insert(axis.id.clone(), value);
        value
    }

    pub fn get(&self, pair: usize, axis_id: &str) -> Option<i32> {
        self.by_pair.get(&pair)?.get(axis_id).copied()
    }

    pub fn pair_scores(&self, pair: usize) -> Option<&AxisScores> {
        self.by_pair.get(&pair)
    }

    /// Number of pairs with at least one score.
    pub fn scored_pairs(&self) -> usize {
        self.by_pair.values().filter(|s| !s.is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.scored_pairs() == 0
    }

    pub fn clear(&mut self) {
        self.by_pair.clear();
    }

    /// Re-key by each pair's A-filename for persistence.
    ///
    /// Pairs sharing an A-filename collide; they are merged in pair order, so
    /// the later pair wins per axis.
    pub fn to_results(&self, pairs: &[ImagePair]) -> SavedResults {
        let duplicates = duplicate_filenames(pairs);
        if !duplicates.is_empty() {
            warn!(
                ?duplicates,
                "Pairs share an A-filename; their saved scores will collide"
            );
        }

        let mut results = SavedResults::new();
        for (index, scores) in &self.by_pair {
            if scores.is_empty() {
                continue;
            }
            let Some(pair) = pairs.get(*index) else {
                debug!(index, "Dropping scores for a pair that no longer exists");
                continue;
            };
            results
                .entry(pair.a.clone())
                .or_default()
                .extend(scores.iter().map(|(k, v)| (k.clone(), *v)));
        }
        results
    }

    /// Rebuild a session map from persisted results.
    ///
    /// Every pair whose A-filename has an entry receives it. Scores for axes
    /// not in `axes` are dropped; the rest are clamped to the axis range.
    pub fn from_results(results: &SavedResults, pairs: &[ImagePair], axes: &[ScoreAxis]) -> Self {
        let mut map = Self::new();
        for (index, pair) in pairs.iter().enumerate() {
            let Some(saved) = results.get(&pair.a) else {
                continue;
            };
            for (axis_id, value) in saved {
                match axes.iter().find(|a| &a.id == axis_id) {
                    Some(axis) => {
                        map.set(index, axis, *value);
                    }
                    None => debug!(axis_id, "Ignoring saved score for unknown axis"),
                }
            }
        }
        map
    }
}

/// A-filenames used by more than one pair.
pub fn duplicate_filenames(pairs: &[ImagePair]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for pair in pairs {
        if !seen.insert(pair.a.as_str()) {
            duplicates.insert(pair.a.clone());
        }
    }
    duplicates.into_iter().collect()
}

/// Body of `POST /save_evaluation`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub template_id: String,
    pub user_id: String,
    pub created_at: String,
    pub results: SavedResults,
}

impl EvaluationRecord {
    pub fn new(
        template_id: impl Into<String>,
        user_id: impl Into<String>,
        created_at: DateTime<Utc>,
        results: SavedResults,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            user_id: user_id.into(),
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            results,
        }
    }
}
