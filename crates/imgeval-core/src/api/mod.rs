//! Evaluation backend: endpoint paths, the [`Backend`] trait, and the
//! blocking HTTP client that implements it.

mod http;
pub mod wire;

pub use http::HttpBackend;

use crate::error::Result;
use crate::model::{TemplateDetail, TemplateRecord, Threshold};
use crate::scores::{EvaluationRecord, SavedResults};

pub const LIST_TEMPLATES: &str = "list_templates";
pub const EVAL_TEMPLATES: &str = "eval_templates";
pub const TEMPLATE_DETAIL: &str = "eval_template_detail";
pub const GET_IMAGE: &str = "get_image";
pub const DIFF_IMAGE: &str = "diff_image";
pub const ZOOM_LEVELS: &str = "zoom_levels";
pub const LOAD_EVALUATION: &str = "load_evaluation";
pub const SAVE_EVALUATION: &str = "save_evaluation";

/// Everything the comparison view needs from the server.
///
/// Calls block; callers run them off the UI thread.
pub trait Backend: Send + Sync {
    /// Template file names, e.g. `template_1.json`.
    fn list_templates(&self) -> Result<Vec<String>>;

    fn get_template(&self, filename: &str) -> Result<TemplateRecord>;

    fn template_detail(&self, template_id: &str) -> Result<TemplateDetail>;

    /// Raw bytes of one source image.
    fn get_image(&self, template_id: &str, filename: &str) -> Result<Vec<u8>>;

    /// Raw bytes of the server-rendered diff of `img1` and `img2`.
    fn diff_image(
        &self,
        template_id: &str,
        img1: &str,
        img2: &str,
        threshold: Threshold,
    ) -> Result<Vec<u8>>;

    fn zoom_levels(&self) -> Result<Vec<f32>>;

    /// Previously saved scores, or `None` if this user has not saved any.
    fn load_evaluation(&self, template_id: &str, user_id: &str) -> Result<Option<SavedResults>>;

    fn save_evaluation(&self, record: &EvaluationRecord) -> Result<()>;
}
