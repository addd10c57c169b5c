mod dispatch;
mod images;
mod save;
mod templates;

pub use dispatch::spawn_worker;
pub(crate) use dispatch::{send, send_error, send_log};
pub use images::start_batch;
