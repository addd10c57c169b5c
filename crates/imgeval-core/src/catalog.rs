use std::cmp::Ordering;
use std::fmt;

use tracing::{info, warn};

use crate::api::Backend;
use crate::error::Result;
use crate::model::TemplateRecord;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Start date, newest first.
    #[default]
    Latest,
    Oldest,
    Title,
}

impl SortOrder {
    pub const ALL: [SortOrder; 3] = [SortOrder::Latest, SortOrder::Oldest, SortOrder::Title];
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Latest => write!(f, "Latest"),
            SortOrder::Oldest => write!(f, "Oldest"),
            SortOrder::Title => write!(f, "Title"),
        }
    }
}

/// Every template record the backend offers.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<TemplateRecord>,
}

impl Catalog {
    /// List the template files, then fetch each record.
    ///
    /// A record that fails to load is skipped. A list response without a
    /// `templates` field is an error. `on_progress(done, total)` runs after
    /// every record.
    pub fn fetch<F>(backend: &dyn Backend, mut on_progress: F) -> Result<Self>
    where
        F: FnMut(usize, usize),
    {
        let filenames = backend.list_templates()?;
        let total = filenames.len();
        let mut entries = Vec::with_capacity(total);

        for (i, filename) in filenames.iter().enumerate() {
            match backend.get_template(filename) {
                Ok(record) => entries.push(record),
                Err(e) => warn!(filename, "Skipping template: {e}"),
            }
            on_progress(i + 1, total);
        }

        info!(loaded = entries.len(), listed = total, "Fetched template catalog");
        Ok(Self { entries })
    }

    pub fn from_records(entries: Vec<TemplateRecord>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn records(&self) -> &[TemplateRecord] {
        &self.entries
    }

    pub fn find(&self, template_id: &str) -> Option<&TemplateRecord> {
        self.entries.iter().find(|r| r.template_id == template_id)
    }

    /// Filter by a case-insensitive substring of title or description, then sort.
    pub fn query(&self, search: &str, order: SortOrder) -> Vec<&TemplateRecord> {
        let needle = search.trim().to_lowercase();
        let mut hits: Vec<&TemplateRecord> = self
            .entries
            .iter()
            .filter(|r| {
                needle.is_empty()
                    || r.template_name.to_lowercase().contains(&needle)
                    || r.description.to_lowercase().contains(&needle)
            })
            .collect();

        match order {
            SortOrder::Latest => hits.sort_by(|a, b| by_date(a, b, true)),
            SortOrder::Oldest => hits.sort_by(|a, b| by_date(a, b, false)),
            SortOrder::Title => hits.sort_by(|a, b| {
                a.template_name
                    .to_lowercase()
                    .cmp(&b.template_name.to_lowercase())
            }),
        }
        hits
    }
}

// Undated records go last in either direction.
fn by_date(a: &TemplateRecord, b: &TemplateRecord, newest_first: bool) -> Ordering {
    match (a.start(), b.start()) {
        (Some(da), Some(db)) if newest_first => db.cmp(&da),
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Number of pages needed for `len` items.
pub fn page_count(len: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    len.div_ceil(per_page)
}

/// Items on 1-based page `page`. Out-of-range pages are empty.
pub fn page<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(per_page);
    if start >= items.len() {
        return &[];
    }
    let end = (start + per_page).min(items.len());
    &items[start..end]
}
