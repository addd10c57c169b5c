use std::sync::{mpsc, Arc};

use imgeval_core::api::Backend;

use crate::messages::{WorkerCommand, WorkerResult};

use super::{save, templates};

/// Spawn the metadata worker thread. Returns the command sender.
pub fn spawn_worker(
    backend: Arc<dyn Backend>,
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) -> mpsc::Sender<WorkerCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    std::thread::Builder::new()
        .name("imgeval-worker".into())
        .spawn(move || {
            worker_loop(backend, cmd_rx, result_tx, ctx);
        })
        .expect("Failed to spawn worker thread");

    cmd_tx
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

fn worker_loop(
    mut backend: Arc<dyn Backend>,
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::FetchCatalog => {
                templates::handle_fetch_catalog(backend.as_ref(), &tx, &ctx);
            }
            WorkerCommand::FetchDetail { template_id } => {
                templates::handle_fetch_detail(backend.as_ref(), template_id, &tx, &ctx);
            }
            WorkerCommand::FetchPrior {
                template_id,
                user_id,
            } => {
                save::handle_fetch_prior(backend.as_ref(), template_id, &user_id, &tx, &ctx);
            }
            WorkerCommand::FetchZoomLevels => {
                templates::handle_fetch_zoom_levels(backend.as_ref(), &tx, &ctx);
            }
            WorkerCommand::Save { record } => {
                save::handle_save(backend.as_ref(), &record, &tx, &ctx);
            }
            WorkerCommand::UseBackend { backend: next } => {
                backend = next;
                send_log(&tx, &ctx, "Backend changed");
            }
        }
    }
}
