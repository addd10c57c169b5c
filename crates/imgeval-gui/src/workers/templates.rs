use std::sync::mpsc;
use std::time::Instant;

use imgeval_core::api::Backend;
use imgeval_core::catalog::Catalog;
use imgeval_core::error::EvalError;
use tracing::{info, warn};

use crate::messages::WorkerResult;

use super::{send, send_log};

pub(super) fn handle_fetch_catalog(
    backend: &dyn Backend,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    let progress_tx = tx.clone();
    let progress_ctx = ctx.clone();
    let fetched = Catalog::fetch(backend, |done, total| {
        let _ = progress_tx.send(WorkerResult::CatalogProgress { done, total });
        progress_ctx.request_repaint();
    });

    match fetched {
        Ok(catalog) => {
            send_log(
                tx,
                ctx,
                format!(
                    "Loaded {} templates in {:.1}s",
                    catalog.len(),
                    start.elapsed().as_secs_f32()
                ),
            );
            send(tx, ctx, WorkerResult::CatalogLoaded { catalog });
        }
        Err(e) => {
            warn!("Template list failed: {e}");
            let message = match e {
                EvalError::MissingField(_) | EvalError::NotFound(_) => "No templates found".into(),
                other => format!("Failed to load templates: {other}"),
            };
            send(tx, ctx, WorkerResult::CatalogFailed { message });
        }
    }
}

pub(super) fn handle_fetch_detail(
    backend: &dyn Backend,
    template_id: String,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match backend.template_detail(&template_id) {
        Ok(detail) => {
            send_log(
                tx,
                ctx,
                format!(
                    "Template {template_id}: {} pairs, {} axes",
                    detail.image_pairs.len(),
                    detail.axes.len()
                ),
            );
            send(
                tx,
                ctx,
                WorkerResult::Detail {
                    template_id,
                    detail,
                },
            );
        }
        Err(e) => {
            warn!(%template_id, "Template detail failed: {e}");
            let message = e.to_string();
            send(
                tx,
                ctx,
                WorkerResult::DetailFailed {
                    template_id,
                    message,
                },
            );
        }
    }
}

pub(super) fn handle_fetch_zoom_levels(
    backend: &dyn Backend,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let levels = match backend.zoom_levels() {
        Ok(levels) => {
            info!(?levels, "Fetched zoom levels");
            Some(levels)
        }
        Err(e) => {
            warn!("Zoom levels unavailable: {e}");
            None
        }
    };
    send(tx, ctx, WorkerResult::ZoomLevels { levels });
}
