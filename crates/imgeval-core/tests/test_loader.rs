#[allow(dead_code)]
mod common;

use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

use imgeval_core::api::Backend;
use imgeval_core::error::EvalError;
use imgeval_core::loader::{
    decode_bitmap, load_bitmap, spawn_batch, ImageSlot, ImageSource, LoadBarrier,
    LoadBatch, LoadRequest, RenderPolicy,
};
use imgeval_core::model::Threshold;

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[test]
fn test_decode_png() {
    let bytes = common::png_bytes(&common::solid_rgba(5, 4, [1, 2, 3, 255]));
    let bitmap = decode_bitmap(&bytes).unwrap();
    assert_eq!((bitmap.width(), bitmap.height()), (5, 4));
    assert_eq!(bitmap.image().get_pixel(0, 0).0, [1, 2, 3, 255]);
}

#[test]
fn test_decode_garbage_is_explicit_error() {
    assert!(matches!(
        decode_bitmap(b"<html>not an image</html>"),
        Err(EvalError::Decode(_))
    ));
    assert!(matches!(decode_bitmap(&[]), Err(EvalError::Decode(_))));
}

#[test]
fn test_load_missing_image_reports_status() {
    let backend = common::MemoryBackend::with_sample();
    let source = ImageSource::Original {
        template_id: "t1".into(),
        filename: "nope.png".into(),
    };
    assert!(matches!(
        load_bitmap(&backend, &source),
        Err(EvalError::Status { code: 404, .. })
    ));
}

// ---------------------------------------------------------------------------
// Batches
// ---------------------------------------------------------------------------

#[test]
fn test_spawn_batch_delivers_every_completion() {
    let backend = Arc::new(common::MemoryBackend::with_sample());
    let batch = LoadBatch {
        epoch: 7,
        requests: vec![
            LoadRequest {
                slot: ImageSlot::A,
                source: ImageSource::Original {
                    template_id: "t1".into(),
                    filename: "1a.png".into(),
                },
            },
            LoadRequest {
                slot: ImageSlot::B,
                source: ImageSource::Original {
                    template_id: "t1".into(),
                    filename: "1b.png".into(),
                },
            },
            LoadRequest {
                slot: ImageSlot::Diff,
                source: ImageSource::Diff {
                    template_id: "t1".into(),
                    img1: "1a.png".into(),
                    img2: "1b.png".into(),
                    threshold: Threshold::new(33),
                },
            },
        ],
    };

    let (tx, rx) = mpsc::channel();
    let tx = std::sync::Mutex::new(tx);
    spawn_batch(backend.clone() as Arc<dyn Backend>, batch, move |c| {
        let _ = tx.lock().unwrap().send(c);
    });

    let mut slots = Vec::new();
    for _ in 0..3 {
        let c = rx.recv_timeout(Duration::from_secs(10)).unwrap();
        assert_eq!(c.epoch, 7);
        assert!(c.result.is_ok());
        slots.push(c.slot);
    }
    slots.sort();
    assert_eq!(slots, ImageSlot::ALL.to_vec());

    let diffs = backend.diff_requests.lock().unwrap();
    assert_eq!(diffs.len(), 1);
    assert_eq!(diffs[0].2, Threshold::new(33));
}

// ---------------------------------------------------------------------------
// Barrier / policy
// ---------------------------------------------------------------------------

#[test]
fn test_barrier_opens_exactly_once() {
    let mut barrier = LoadBarrier::new(3);
    assert!(!barrier.arrive());
    assert!(!barrier.arrive());
    assert!(barrier.arrive());
    assert!(barrier.is_open());
    assert!(!barrier.arrive());
    assert_eq!(barrier.arrived(), 3);
}

#[test]
fn test_render_policy_config_names() {
    assert_eq!(RenderPolicy::default(), RenderPolicy::Independent);
    assert_eq!(
        serde_json::to_string(&RenderPolicy::WaitForAll).unwrap(),
        "\"wait_for_all\""
    );
}
