use std::sync::Arc;

use imgeval_core::api::Backend;
use imgeval_core::catalog::Catalog;
use imgeval_core::config::AppConfig;
use imgeval_core::loader::LoadCompletion;
use imgeval_core::model::TemplateDetail;
use imgeval_core::scores::{EvaluationRecord, SavedResults};

/// Commands sent from UI thread to the metadata worker.
pub enum WorkerCommand {
    /// List templates and fetch every record.
    FetchCatalog,

    /// Pairs and axes of one template.
    FetchDetail { template_id: String },

    /// Scores this user saved earlier for the template, if any.
    FetchPrior {
        template_id: String,
        user_id: String,
    },

    FetchZoomLevels,

    /// Persist the whole score map.
    Save { record: EvaluationRecord },

    /// Swap the backend after the API URL changed.
    UseBackend { backend: Arc<dyn Backend> },
}

/// Results sent from worker threads back to UI thread.
pub enum WorkerResult {
    CatalogLoaded {
        catalog: Catalog,
    },
    CatalogFailed {
        message: String,
    },
    CatalogProgress {
        done: usize,
        total: usize,
    },
    Detail {
        template_id: String,
        detail: TemplateDetail,
    },
    DetailFailed {
        template_id: String,
        message: String,
    },
    PriorScores {
        template_id: String,
        results: Option<SavedResults>,
    },
    /// `None` when the fetch failed and the built-in levels apply.
    ZoomLevels {
        levels: Option<Vec<f32>>,
    },
    /// One image of a load batch, from the rayon pool.
    ImageLoaded(LoadCompletion),
    Saved {
        template_id: String,
        pairs: usize,
    },
    ConfigImported {
        config: AppConfig,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
