use std::sync::mpsc;

use imgeval_core::api::Backend;
use imgeval_core::scores::EvaluationRecord;
use tracing::{error, warn};

use crate::messages::WorkerResult;

use super::{send, send_error};

pub(super) fn handle_fetch_prior(
    backend: &dyn Backend,
    template_id: String,
    user_id: &str,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    // A failed lookup is treated as "nothing saved"; scoring still works.
    let results = match backend.load_evaluation(&template_id, user_id) {
        Ok(results) => results,
        Err(e) => {
            warn!(%template_id, "Could not load previous evaluation: {e}");
            None
        }
    };
    send(
        tx,
        ctx,
        WorkerResult::PriorScores {
            template_id,
            results,
        },
    );
}

pub(super) fn handle_save(
    backend: &dyn Backend,
    record: &EvaluationRecord,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match backend.save_evaluation(record) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::Saved {
                template_id: record.template_id.clone(),
                pairs: record.results.len(),
            },
        ),
        Err(e) => {
            error!(template_id = %record.template_id, "Save failed: {e}");
            send_error(tx, ctx, format!("Save failed: {e}"));
        }
    }
}
