use imgeval_core::catalog::{Catalog, SortOrder};

/// Maximum number of log lines kept in the status panel.
const MAX_LOG_LINES: usize = 500;

/// Overall UI state outside the comparison session.
pub struct UIState {
    pub catalog: Option<Catalog>,
    /// Shown in place of the list when the catalog could not be loaded.
    pub catalog_error: Option<String>,
    pub catalog_progress: Option<(usize, usize)>,
    pub loading_catalog: bool,

    pub search: String,
    pub sort: SortOrder,
    /// 1-based.
    pub page: usize,

    /// Raw threshold text; only valid values reach the session.
    pub threshold_input: String,

    pub saving: bool,

    pub log_messages: Vec<String>,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            catalog: None,
            catalog_error: None,
            catalog_progress: None,
            loading_catalog: false,
            search: String::new(),
            sort: SortOrder::default(),
            page: 1,
            threshold_input: String::new(),
            saving: false,
            log_messages: Vec::new(),
        }
    }
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_LINES {
            let excess = self.log_messages.len() - MAX_LOG_LINES;
            self.log_messages.drain(..excess);
        }
    }
}
