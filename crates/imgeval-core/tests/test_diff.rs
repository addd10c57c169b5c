#[allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};

use imgeval_core::diff::{
    caption, classify_rgb, compute_diff, diff_magnitude, legend, DiffClass, DiffLegend,
};
use imgeval_core::error::EvalError;
use imgeval_core::loader::Bitmap;
use imgeval_core::model::Threshold;

// ---------------------------------------------------------------------------
// Magnitude
// ---------------------------------------------------------------------------

#[test]
fn test_magnitude_is_mean_channel_difference() {
    let a = common::solid_rgb(3, 2, [10, 20, 30]);
    let b = common::solid_rgb(3, 2, [13, 14, 30]);
    let m = diff_magnitude(&a, &b).unwrap();
    assert_eq!(m.dim(), (2, 3));
    assert_relative_eq!(m[[1, 2]], 3.0);
}

#[test]
fn test_magnitude_parallel_path_matches() {
    // 300x300 exceeds the row-parallel pixel threshold.
    let a = RgbImage::from_fn(300, 300, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 0]));
    let b = common::solid_rgb(300, 300, [0, 0, 0]);
    let m = diff_magnitude(&a, &b).unwrap();
    assert_relative_eq!(m[[10, 20]], (20.0 + 10.0) / 3.0);
    assert_relative_eq!(m[[299, 299]], (43.0 + 43.0) / 3.0);
}

#[test]
fn test_dimension_mismatch() {
    let a = common::solid_rgb(3, 2, [0, 0, 0]);
    let b = common::solid_rgb(2, 3, [0, 0, 0]);
    assert!(matches!(
        diff_magnitude(&a, &b),
        Err(EvalError::DimensionMismatch {
            a_width: 3,
            a_height: 2,
            b_width: 2,
            b_height: 3
        })
    ));
}

// ---------------------------------------------------------------------------
// Local diff colours
// ---------------------------------------------------------------------------

#[test]
fn test_compute_diff_three_colours() {
    let a = RgbImage::from_fn(3, 1, |_, _| Rgb([100, 100, 100]));
    let b = RgbImage::from_fn(3, 1, |x, _| match x {
        0 => Rgb([100, 100, 100]),
        1 => Rgb([110, 110, 110]),
        _ => Rgb([200, 200, 200]),
    });
    let out = compute_diff(
        &DynamicImage::ImageRgb8(a),
        &DynamicImage::ImageRgb8(b),
        Threshold::new(20),
    )
    .unwrap();

    assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
    assert_eq!(out.get_pixel(1, 0), &Rgb([0, 0, 255]));
    assert_eq!(out.get_pixel(2, 0), &Rgb([255, 0, 0]));
}

#[test]
fn test_magnitude_equal_to_threshold_is_within() {
    assert_eq!(
        DiffClass::from_magnitude(20.0, Threshold::new(20)),
        DiffClass::WithinTolerance
    );
    assert_eq!(
        DiffClass::from_magnitude(20.5, Threshold::new(20)),
        DiffClass::OverTolerance
    );
}

#[test]
fn test_zero_threshold_marks_any_change_over() {
    assert_eq!(
        DiffClass::from_magnitude(0.34, Threshold::new(0)),
        DiffClass::OverTolerance
    );
}

// ---------------------------------------------------------------------------
// Legend
// ---------------------------------------------------------------------------

#[test]
fn test_classify_server_colours() {
    assert_eq!(classify_rgb([0, 0, 0]), DiffClass::Identical);
    assert_eq!(classify_rgb([0, 0, 255]), DiffClass::WithinTolerance);
    assert_eq!(classify_rgb([255, 0, 0]), DiffClass::OverTolerance);
    assert_eq!(classify_rgb([1, 2, 3]), DiffClass::Other);
}

#[test]
fn test_legend_counts_and_caption() {
    let image = RgbaImage::from_fn(4, 1, |x, _| match x {
        0 => Rgba([0, 0, 0, 255]),
        1 => Rgba([0, 0, 255, 255]),
        2 => Rgba([255, 0, 0, 255]),
        _ => Rgba([255, 0, 0, 0]),
    });
    let l = legend(&Bitmap::new(image));
    assert_eq!(
        l,
        DiffLegend {
            identical: 1,
            within: 1,
            over: 1,
            other: 1
        }
    );
    assert_relative_eq!(l.over_fraction(), 0.25);
    assert_eq!(
        caption(Threshold::new(20), Some(&l)),
        "Diff (threshold 20, 25.0% over)"
    );
    assert_eq!(caption(Threshold::new(5), None), "Diff (threshold 5)");
}
