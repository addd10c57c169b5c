use std::time::Duration;

use imgeval_core::api::{wire, HttpBackend};
use imgeval_core::error::EvalError;

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[test]
fn test_template_list() {
    let names = wire::parse_template_list(r#"{"templates": ["a.json", "b.json"]}"#).unwrap();
    assert_eq!(names, vec!["a.json", "b.json"]);
}

#[test]
fn test_template_list_missing_field() {
    assert!(matches!(
        wire::parse_template_list(r#"{"error": "x"}"#),
        Err(EvalError::MissingField("templates"))
    ));
    assert!(matches!(
        wire::parse_template_list(r#"{"templates": null}"#),
        Err(EvalError::MissingField("templates"))
    ));
}

#[test]
fn test_template_record_object_or_array() {
    let object = r#"{"template_id": 12, "template_name": "Night", "created_by": "bob@x.org"}"#;
    let record = wire::parse_template_record(object).unwrap();
    assert_eq!(record.template_id, "12");
    assert_eq!(record.author(), "bob");
    assert_eq!(record.start_label(), "N/A");

    let array = r#"[{"template_id": "t9", "template_name": "Day", "start_date": "2024-05-01"}]"#;
    let record = wire::parse_template_record(array).unwrap();
    assert_eq!(record.template_id, "t9");
    assert_eq!(record.author(), "Unknown");
    assert_eq!(record.start_label(), "2024-05-01");

    assert!(matches!(
        wire::parse_template_record("[]"),
        Err(EvalError::NotFound(_))
    ));
}

#[test]
fn test_template_detail_reads_query_as_axes() {
    let body = r#"{
        "image_pairs": [{"a": "1a.png", "b": "1b.png"}],
        "query": [{"id": "sharpness", "label": "Sharpness", "step": 5}]
    }"#;
    let detail = wire::parse_template_detail(body).unwrap();
    assert_eq!(detail.image_pairs[0].b, "1b.png");
    assert_eq!(detail.axes[0].id, "sharpness");
    assert_eq!(detail.axes[0].step, 5);
}

#[test]
fn test_template_detail_defaults_missing_lists() {
    let detail = wire::parse_template_detail("{}").unwrap();
    assert!(detail.image_pairs.is_empty());
    assert!(detail.axes.is_empty());
}

#[test]
fn test_zoom_levels() {
    assert_eq!(
        wire::parse_zoom_levels(r#"{"zoom_levels": [0.5, 1, 2]}"#).unwrap(),
        vec![0.5, 1.0, 2.0]
    );
    assert!(wire::parse_zoom_levels("{}").is_err());
}

#[test]
fn test_evaluation_absent_means_none() {
    assert_eq!(wire::parse_evaluation("").unwrap(), None);
    assert_eq!(wire::parse_evaluation("{}").unwrap(), None);
    assert_eq!(wire::parse_evaluation(r#"{"results": null}"#).unwrap(), None);

    let saved = wire::parse_evaluation(r#"{"results": {"1a.png": {"sharpness": -2}}}"#)
        .unwrap()
        .unwrap();
    assert_eq!(saved["1a.png"]["sharpness"], -2);
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

fn backend(base: &str) -> HttpBackend {
    HttpBackend::new(base, Duration::from_secs(1)).unwrap()
}

#[test]
fn test_endpoint_query_is_encoded() {
    let b = backend("http://localhost:8000");
    let url = b
        .endpoint(
            "get_image",
            &[("template_id", "t 1"), ("filename", "a&b.png")],
        )
        .unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/get_image?template_id=t+1&filename=a%26b.png"
    );
}

#[test]
fn test_endpoint_keeps_base_path() {
    let b = backend("http://host/api");
    assert_eq!(b.base_url().as_str(), "http://host/api/");
    let url = b.endpoint("zoom_levels", &[]).unwrap();
    assert_eq!(url.as_str(), "http://host/api/zoom_levels");
}

#[test]
fn test_endpoint_segment_escapes_filename() {
    let b = backend("http://localhost:8000/");
    let url = b.endpoint_segment("eval_templates", "my template.json").unwrap();
    assert_eq!(
        url.as_str(),
        "http://localhost:8000/eval_templates/my%20template.json"
    );
}

#[test]
fn test_invalid_base_url() {
    assert!(matches!(
        HttpBackend::new("not a url", Duration::from_secs(1)),
        Err(EvalError::InvalidUrl(_))
    ));
}
