use std::collections::BTreeMap;
use std::io::Cursor;
use std::sync::Mutex;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

use imgeval_core::api::Backend;
use imgeval_core::error::{EvalError, Result};
use imgeval_core::model::{ImagePair, ScoreAxis, TemplateDetail, TemplateRecord, Threshold};
use imgeval_core::scores::{EvaluationRecord, SavedResults};

/// Encode an RGBA image as PNG bytes.
pub fn png_bytes(image: &RgbaImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut out, ImageFormat::Png)
        .expect("png encode");
    out.into_inner()
}

pub fn solid_rgba(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}

pub fn solid_rgb(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(rgb))
}

/// Two pairs, one `sharpness` axis with step 5.
pub fn sample_detail() -> TemplateDetail {
    TemplateDetail {
        image_pairs: vec![
            ImagePair::new("1a.png", "1b.png"),
            ImagePair::new("2a.png", "2b.png"),
        ],
        axes: vec![ScoreAxis::new("sharpness", "Sharpness", 5)],
    }
}

pub fn record(id: &str, name: &str, description: &str, start: Option<&str>) -> TemplateRecord {
    TemplateRecord {
        template_id: id.to_string(),
        template_name: name.to_string(),
        description: description.to_string(),
        created_at: None,
        start_date: start.map(str::to_string),
        end_date: None,
        created_by: Some(format!("{}@example.com", name.to_lowercase())),
    }
}

/// In-memory backend. Images are served by filename; diffs are a solid
/// red image regardless of input.
#[derive(Default)]
pub struct MemoryBackend {
    pub templates: BTreeMap<String, std::result::Result<TemplateRecord, String>>,
    pub details: BTreeMap<String, TemplateDetail>,
    pub images: BTreeMap<String, Vec<u8>>,
    pub zoom: Option<Vec<f32>>,
    pub evaluations: Mutex<BTreeMap<(String, String), SavedResults>>,
    pub saved: Mutex<Vec<EvaluationRecord>>,
    pub diff_requests: Mutex<Vec<(String, String, Threshold)>>,
}

impl MemoryBackend {
    pub fn with_sample() -> Self {
        let mut backend = Self::default();
        backend.details.insert("t1".into(), sample_detail());
        for name in ["1a.png", "1b.png", "2a.png", "2b.png"] {
            backend
                .images
                .insert(name.into(), png_bytes(&solid_rgba(4, 3, [10, 20, 30, 255])));
        }
        backend.zoom = Some(vec![0.25, 0.5, 0.75, 1.0, 2.0, 4.0]);
        backend
    }
}

impl Backend for MemoryBackend {
    fn list_templates(&self) -> Result<Vec<String>> {
        Ok(self.templates.keys().cloned().collect())
    }

    fn get_template(&self, filename: &str) -> Result<TemplateRecord> {
        match self.templates.get(filename) {
            Some(Ok(record)) => Ok(record.clone()),
            Some(Err(message)) => Err(EvalError::Http(message.clone())),
            None => Err(EvalError::NotFound(filename.to_string())),
        }
    }

    fn template_detail(&self, template_id: &str) -> Result<TemplateDetail> {
        self.details
            .get(template_id)
            .cloned()
            .ok_or_else(|| EvalError::NotFound(template_id.to_string()))
    }

    fn get_image(&self, _template_id: &str, filename: &str) -> Result<Vec<u8>> {
        self.images
            .get(filename)
            .cloned()
            .ok_or_else(|| EvalError::Status {
                code: 404,
                url: filename.to_string(),
            })
    }

    fn diff_image(
        &self,
        _template_id: &str,
        img1: &str,
        img2: &str,
        threshold: Threshold,
    ) -> Result<Vec<u8>> {
        self.diff_requests
            .lock()
            .unwrap()
            .push((img1.to_string(), img2.to_string(), threshold));
        Ok(png_bytes(&solid_rgba(4, 3, [255, 0, 0, 255])))
    }

    fn zoom_levels(&self) -> Result<Vec<f32>> {
        self.zoom
            .clone()
            .ok_or_else(|| EvalError::Http("connection refused".into()))
    }

    fn load_evaluation(&self, template_id: &str, user_id: &str) -> Result<Option<SavedResults>> {
        Ok(self
            .evaluations
            .lock()
            .unwrap()
            .get(&(template_id.to_string(), user_id.to_string()))
            .cloned())
    }

    fn save_evaluation(&self, record: &EvaluationRecord) -> Result<()> {
        self.evaluations.lock().unwrap().insert(
            (record.template_id.clone(), record.user_id.clone()),
            record.results.clone(),
        );
        self.saved.lock().unwrap().push(record.clone());
        Ok(())
    }
}
