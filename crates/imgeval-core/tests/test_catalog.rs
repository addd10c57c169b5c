#[allow(dead_code)]
mod common;

use imgeval_core::catalog::{page, page_count, Catalog, SortOrder};
use imgeval_core::error::EvalError;

fn catalog() -> Catalog {
    Catalog::from_records(vec![
        common::record("1", "Beta", "night sky", Some("2024-02-01")),
        common::record("2", "alpha", "Portrait set", None),
        common::record("3", "Gamma", "landscape", Some("2024-05-10")),
        common::record("4", "Delta", "NIGHT city", Some("2023-12-31T08:00:00Z")),
    ])
}

fn ids(records: &[&imgeval_core::model::TemplateRecord]) -> Vec<String> {
    records.iter().map(|r| r.template_id.clone()).collect()
}

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

#[test]
fn test_fetch_skips_failed_records() {
    let mut backend = common::MemoryBackend::default();
    backend.templates.insert(
        "a.json".into(),
        Ok(common::record("1", "A", "", None)),
    );
    backend
        .templates
        .insert("b.json".into(), Err("timeout".into()));

    let mut progress = Vec::new();
    let catalog = Catalog::fetch(&backend, |done, total| progress.push((done, total))).unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(progress, vec![(1, 2), (2, 2)]);
    assert!(catalog.find("1").is_some());
}

#[test]
fn test_fetch_propagates_list_error() {
    struct NoList;
    impl imgeval_core::api::Backend for NoList {
        fn list_templates(&self) -> imgeval_core::error::Result<Vec<String>> {
            Err(EvalError::MissingField("templates"))
        }
        fn get_template(
            &self,
            _: &str,
        ) -> imgeval_core::error::Result<imgeval_core::model::TemplateRecord> {
            unreachable!()
        }
        fn template_detail(
            &self,
            _: &str,
        ) -> imgeval_core::error::Result<imgeval_core::model::TemplateDetail> {
            unreachable!()
        }
        fn get_image(&self, _: &str, _: &str) -> imgeval_core::error::Result<Vec<u8>> {
            unreachable!()
        }
        fn diff_image(
            &self,
            _: &str,
            _: &str,
            _: &str,
            _: imgeval_core::model::Threshold,
        ) -> imgeval_core::error::Result<Vec<u8>> {
            unreachable!()
        }
        fn zoom_levels(&self) -> imgeval_core::error::Result<Vec<f32>> {
            unreachable!()
        }
        fn load_evaluation(
            &self,
            _: &str,
            _: &str,
        ) -> imgeval_core::error::Result<Option<imgeval_core::scores::SavedResults>> {
            unreachable!()
        }
        fn save_evaluation(
            &self,
            _: &imgeval_core::scores::EvaluationRecord,
        ) -> imgeval_core::error::Result<()> {
            unreachable!()
        }
    }

    assert!(matches!(
        Catalog::fetch(&NoList, |_, _| {}),
        Err(EvalError::MissingField("templates"))
    ));
}

// ---------------------------------------------------------------------------
// Search and sort
// ---------------------------------------------------------------------------

#[test]
fn test_search_title_or_description_case_insensitive() {
    let c = catalog();
    assert_eq!(ids(&c.query("night", SortOrder::Title)), vec!["1", "4"]);
    assert_eq!(ids(&c.query("ALPHA", SortOrder::Latest)), vec!["2"]);
    assert_eq!(c.query("  ", SortOrder::Latest).len(), 4);
}

#[test]
fn test_sort_latest_puts_undated_last() {
    let c = catalog();
    assert_eq!(ids(&c.query("", SortOrder::Latest)), vec!["3", "1", "4", "2"]);
}

#[test]
fn test_sort_oldest() {
    let c = catalog();
    assert_eq!(ids(&c.query("", SortOrder::Oldest)), vec!["4", "1", "3", "2"]);
}

#[test]
fn test_sort_title_alphabetical() {
    let c = catalog();
    assert_eq!(ids(&c.query("", SortOrder::Title)), vec!["2", "1", "4", "3"]);
}

// ---------------------------------------------------------------------------
// Paging
// ---------------------------------------------------------------------------

#[test]
fn test_pages() {
    let items: Vec<u32> = (1..=15).collect();
    assert_eq!(page_count(items.len(), 7), 3);
    assert_eq!(page(&items, 1, 7), &[1, 2, 3, 4, 5, 6, 7]);
    assert_eq!(page(&items, 3, 7), &[15]);
    assert!(page(&items, 4, 7).is_empty());
    assert!(page(&items, 0, 7).is_empty());
    assert_eq!(page_count(0, 7), 0);
}
