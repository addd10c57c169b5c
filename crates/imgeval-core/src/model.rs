use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::consts::{DEFAULT_THRESHOLD, DEFAULT_ZOOM_LEVELS, MISSING_DATE_LABEL};
use crate::error::{EvalError, Result};

/// Two source images to compare. Selected by position, never by identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePair {
    pub a: String,
    pub b: String,
}

impl ImagePair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
        }
    }
}

/// One scorable dimension. Scores are symmetric around zero:
/// `[-floor(step / 2), floor(step / 2)]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreAxis {
    pub id: String,
    pub label: String,
    pub step: u32,
}

impl ScoreAxis {
    pub fn new(id: impl Into<String>, label: impl Into<String>, step: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            step,
        }
    }

    pub fn half(&self) -> i32 {
        (self.step / 2) as i32
    }

    pub fn range(&self) -> RangeInclusive<i32> {
        -self.half()..=self.half()
    }

    pub fn clamp(&self, value: i32) -> i32 {
        value.clamp(-self.half(), self.half())
    }
}

/// Pairs and axes of one evaluation template.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateDetail {
    #[serde(default)]
    pub image_pairs: Vec<ImagePair>,
    #[serde(default, rename = "query")]
    pub axes: Vec<ScoreAxis>,
}

/// Catalog metadata for a template file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TemplateRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub template_id: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub created_by: Option<String>,
}

impl TemplateRecord {
    /// Local part of `created_by`, or `Unknown`.
    pub fn author(&self) -> &str {
        match self.created_by.as_deref() {
            Some(email) if !email.is_empty() => email.split('@').next().unwrap_or(email),
            _ => "Unknown",
        }
    }

    pub fn start_label(&self) -> &str {
        date_label(self.start_date.as_deref())
    }

    pub fn end_label(&self) -> &str {
        date_label(self.end_date.as_deref())
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start_date.as_deref().and_then(parse_date)
    }
}

fn date_label(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => MISSING_DATE_LABEL,
    }
}

/// Accepts `2024-03-01` or a full RFC 3339 timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Int(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Int(n) => n.to_string(),
    })
}

/// Diff sensitivity: a pixel counts as "over" when its mean channel
/// difference exceeds this value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Threshold(u8);

impl Threshold {
    pub const MAX: u8 = u8::MAX;

    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl TryFrom<i64> for Threshold {
    type Error = EvalError;

    fn try_from(value: i64) -> Result<Self> {
        u8::try_from(value)
            .map(Self)
            .map_err(|_| EvalError::InvalidThreshold(value))
    }
}

impl From<Threshold> for u8 {
    fn from(t: Threshold) -> u8 {
        t.0
    }
}

impl FromStr for Threshold {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| EvalError::InvalidInput(s.to_string()))?;
        Self::try_from(value)
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ascending list of allowed scale factors. Zoom only ever moves between
/// entries of this list.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomLevels(Vec<f32>);

impl ZoomLevels {
    /// Validate a server-supplied list. Returns `None` when the list is empty
    /// or holds a non-positive or non-finite factor.
    pub fn new(mut levels: Vec<f32>) -> Option<Self> {
        if levels.is_empty() || levels.iter().any(|z| !z.is_finite() || *z <= 0.0) {
            return None;
        }
        levels.sort_by(f32::total_cmp);
        levels.dedup();
        Some(Self(levels))
    }

    pub fn fallback() -> Self {
        Self(DEFAULT_ZOOM_LEVELS.to_vec())
    }

    /// Use the fetched list when it is usable, the built-in list otherwise.
    pub fn or_fallback(fetched: Option<Vec<f32>>) -> Self {
        match fetched.and_then(Self::new) {
            Some(levels) => levels,
            None => {
                warn!("Zoom levels unavailable, using defaults {:?}", DEFAULT_ZOOM_LEVELS);
                Self::fallback()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    /// Scale factor at `index`, clamped to the list bounds.
    pub fn get(&self, index: usize) -> f32 {
        self.0[index.min(self.last_index())]
    }

    /// Index of 100%, or the middle entry when 1.0 is not offered.
    pub fn default_index(&self) -> usize {
        self.0
            .iter()
            .position(|&z| z == 1.0)
            .unwrap_or(self.0.len() / 2)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }
}

impl Default for ZoomLevels {
    fn default() -> Self {
        Self::fallback()
    }
}
