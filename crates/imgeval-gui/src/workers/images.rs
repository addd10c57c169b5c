use std::sync::{mpsc, Arc};

use imgeval_core::api::Backend;
use imgeval_core::loader::{spawn_batch, LoadBatch};

use crate::messages::WorkerResult;

/// Run a load batch on the rayon pool; each image comes back as
/// [`WorkerResult::ImageLoaded`].
pub fn start_batch(
    backend: Arc<dyn Backend>,
    batch: LoadBatch,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let tx = tx.clone();
    let ctx = ctx.clone();
    spawn_batch(backend, batch, move |completion| {
        let _ = tx.send(WorkerResult::ImageLoaded(completion));
        ctx.request_repaint();
    });
}
