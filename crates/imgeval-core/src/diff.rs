use std::fmt;

use image::{DynamicImage, Rgb, RgbImage};
use ndarray::Array2;
use rayon::prelude::*;

use crate::consts::{DIFF_IDENTICAL_RGB, DIFF_OVER_RGB, DIFF_WITHIN_RGB, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{EvalError, Result};
use crate::loader::Bitmap;
use crate::model::Threshold;

/// Colour class of a diff-image pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiffClass {
    Identical,
    WithinTolerance,
    OverTolerance,
    /// Any colour the three-colour scheme does not produce.
    Other,
}

impl DiffClass {
    pub const ALL: [DiffClass; 4] = [
        DiffClass::Identical,
        DiffClass::WithinTolerance,
        DiffClass::OverTolerance,
        DiffClass::Other,
    ];

    /// Class for a mean absolute channel difference.
    pub fn from_magnitude(magnitude: f32, threshold: Threshold) -> Self {
        if magnitude == 0.0 {
            DiffClass::Identical
        } else if magnitude > f32::from(threshold.value()) {
            DiffClass::OverTolerance
        } else {
            DiffClass::WithinTolerance
        }
    }

    pub fn rgb(self) -> Option<[u8; 3]> {
        match self {
            DiffClass::Identical => Some(DIFF_IDENTICAL_RGB),
            DiffClass::WithinTolerance => Some(DIFF_WITHIN_RGB),
            DiffClass::OverTolerance => Some(DIFF_OVER_RGB),
            DiffClass::Other => None,
        }
    }
}

impl fmt::Display for DiffClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiffClass::Identical => write!(f, "Identical"),
            DiffClass::WithinTolerance => write!(f, "Within threshold"),
            DiffClass::OverTolerance => write!(f, "Over threshold"),
            DiffClass::Other => write!(f, "Other"),
        }
    }
}

pub fn classify_rgb(rgb: [u8; 3]) -> DiffClass {
    match rgb {
        DIFF_IDENTICAL_RGB => DiffClass::Identical,
        DIFF_WITHIN_RGB => DiffClass::WithinTolerance,
        DIFF_OVER_RGB => DiffClass::OverTolerance,
        _ => DiffClass::Other,
    }
}

/// Pixel counts per diff class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DiffLegend {
    pub identical: u64,
    pub within: u64,
    pub over: u64,
    pub other: u64,
}

impl DiffLegend {
    pub fn total(&self) -> u64 {
        self.identical + self.within + self.over + self.other
    }

    pub fn count(&self, class: DiffClass) -> u64 {
        match class {
            DiffClass::Identical => self.identical,
            DiffClass::WithinTolerance => self.within,
            DiffClass::OverTolerance => self.over,
            DiffClass::Other => self.other,
        }
    }

    /// Share of pixels over the threshold, in `[0, 1]`.
    pub fn over_fraction(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.over as f64 / total as f64,
        }
    }

    fn add(&mut self, class: DiffClass) {
        match class {
            DiffClass::Identical => self.identical += 1,
            DiffClass::WithinTolerance => self.within += 1,
            DiffClass::OverTolerance => self.over += 1,
            DiffClass::Other => self.other += 1,
        }
    }
}

/// Count the pixels of a server-rendered diff image by colour class.
/// Fully transparent pixels count as `other`.
pub fn legend(bitmap: &Bitmap) -> DiffLegend {
    let mut legend = DiffLegend::default();
    for px in bitmap.image().pixels() {
        let [r, g, b, a] = px.0;
        let class = if a == 0 {
            DiffClass::Other
        } else {
            classify_rgb([r, g, b])
        };
        legend.add(class);
    }
    legend
}

/// Pane caption for the diff image.
pub fn caption(threshold: Threshold, legend: Option<&DiffLegend>) -> String {
    match legend {
        Some(l) if l.total() > 0 => format!(
            "Diff (threshold {threshold}, {:.1}% over)",
            l.over_fraction() * 100.0
        ),
        _ => format!("Diff (threshold {threshold})"),
    }
}

/// Mean absolute RGB difference per pixel, as an `(h, w)` array.
pub fn diff_magnitude(a: &RgbImage, b: &RgbImage) -> Result<Array2<f32>> {
    if a.dimensions() != b.dimensions() {
        return Err(EvalError::DimensionMismatch {
            a_width: a.width(),
            a_height: a.height(),
            b_width: b.width(),
            b_height: b.height(),
        });
    }
    let (w, h) = (a.width() as usize, a.height() as usize);

    let row = |y: usize| -> Vec<f32> {
        (0..w)
            .map(|x| {
                let pa = a.get_pixel(x as u32, y as u32).0;
                let pb = b.get_pixel(x as u32, y as u32).0;
                let sum: u32 = pa
                    .iter()
                    .zip(pb.iter())
                    .map(|(&ca, &cb)| u32::from(ca.abs_diff(cb)))
                    .sum();
                sum as f32 / 3.0
            })
            .collect()
    };

    let rows: Vec<Vec<f32>> = if h * w >= PARALLEL_PIXEL_THRESHOLD {
        (0..h).into_par_iter().map(row).collect()
    } else {
        (0..h).map(row).collect()
    };

    let mut result = Array2::<f32>::zeros((h, w));
    for (y, values) in rows.into_iter().enumerate() {
        for (x, v) in values.into_iter().enumerate() {
            result[[y, x]] = v;
        }
    }
    Ok(result)
}

/// Render the three-colour diff of two images locally.
///
/// Matches the server's colouring: black where equal, blue where the mean
/// channel difference is at most `threshold`, red above it.
pub fn compute_diff(a: &DynamicImage, b: &DynamicImage, threshold: Threshold) -> Result<RgbImage> {
    let magnitudes = diff_magnitude(&a.to_rgb8(), &b.to_rgb8())?;
    let classes = magnitudes.mapv(|m| DiffClass::from_magnitude(m, threshold));
    let (h, w) = classes.dim();

    let mut out = RgbImage::new(w as u32, h as u32);
    for ((y, x), class) in classes.indexed_iter() {
        let rgb = class.rgb().unwrap_or(DIFF_IDENTICAL_RGB);
        out.put_pixel(x as u32, y as u32, Rgb(rgb));
    }
    Ok(out)
}
