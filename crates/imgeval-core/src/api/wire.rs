//! Response parsing, kept apart from transport so it can be tested on
//! literal bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{EvalError, Result};
use crate::model::{TemplateDetail, TemplateRecord};
use crate::scores::SavedResults;

/// `{templates: [filename, ...]}`
pub fn parse_template_list(body: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(body)?;
    let templates = value
        .get("templates")
        .filter(|v| !v.is_null())
        .ok_or(EvalError::MissingField("templates"))?;
    Ok(serde_json::from_value(templates.clone())?)
}

/// A template file holds either one record or a singleton array.
pub fn parse_template_record(body: &str) -> Result<TemplateRecord> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(TemplateRecord),
        Many(Vec<TemplateRecord>),
    }

    match serde_json::from_str(body)? {
        OneOrMany::One(record) => Ok(record),
        OneOrMany::Many(records) => records
            .into_iter()
            .next()
            .ok_or_else(|| EvalError::NotFound("template file holds no records".into())),
    }
}

/// `{image_pairs: [...], query: [...]}`
pub fn parse_template_detail(body: &str) -> Result<TemplateDetail> {
    Ok(serde_json::from_str(body)?)
}

/// `{zoom_levels: [float, ...]}`
pub fn parse_zoom_levels(body: &str) -> Result<Vec<f32>> {
    let value: Value = serde_json::from_str(body)?;
    let levels = value
        .get("zoom_levels")
        .filter(|v| !v.is_null())
        .ok_or(EvalError::MissingField("zoom_levels"))?;
    Ok(serde_json::from_value(levels.clone())?)
}

/// `{results: {...}}`; a missing or null `results` means nothing was saved.
pub fn parse_evaluation(body: &str) -> Result<Option<SavedResults>> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(body)?;
    match value.get("results") {
        None | Some(Value::Null) => Ok(None),
        Some(results) => Ok(Some(serde_json::from_value(results.clone())?)),
    }
}
