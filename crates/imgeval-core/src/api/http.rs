use std::io::Read;
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::config::AppConfig;
use crate::consts::MAX_IMAGE_BYTES;
use crate::error::{EvalError, Result};
use crate::model::{TemplateDetail, TemplateRecord, Threshold};
use crate::scores::{EvaluationRecord, SavedResults};

use super::{wire, Backend};

impl From<ureq::Error> for EvalError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, response) => EvalError::Status {
                code,
                url: response.get_url().to_string(),
            },
            ureq::Error::Transport(transport) => EvalError::Http(transport.to_string()),
        }
    }
}

/// Blocking client for the evaluation server.
pub struct HttpBackend {
    base: Url,
    agent: ureq::Agent,
}

impl HttpBackend {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(api_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Ok(Self { base, agent })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `base/path?k=v&...` with query values percent-encoded.
    pub fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = self.base.join(path)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// `base/prefix/segment` with `segment` encoded as a single path segment.
    pub fn endpoint_segment(&self, prefix: &str, segment: &str) -> Result<Url> {
        let mut url = self.base.join(prefix)?;
        url.path_segments_mut()
            .map_err(|()| EvalError::Http(format!("{} cannot be a base URL", self.base)))?
            .pop_if_empty()
            .push(segment);
        Ok(url)
    }

    fn get_text(&self, url: &Url) -> Result<String> {
        debug!(%url, "GET");
        let response = self.agent.get(url.as_str()).call()?;
        Ok(response.into_string()?)
    }

    fn get_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        debug!(%url, "GET (bytes)");
        let response = self.agent.get(url.as_str()).call()?;
        read_limited(response.into_reader(), MAX_IMAGE_BYTES, url)
    }
}

/// Read a body of at most `limit` bytes. One extra byte is read so an
/// oversized body is reported instead of silently truncated.
fn read_limited(reader: impl Read, limit: u64, url: &Url) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    reader.take(limit + 1).read_to_end(&mut bytes)?;
    if bytes.len() as u64 > limit {
        return Err(EvalError::TooLarge {
            limit,
            url: url.to_string(),
        });
    }
    Ok(bytes)
}

impl Backend for HttpBackend {
    fn list_templates(&self) -> Result<Vec<String>> {
        let url = self.endpoint(super::LIST_TEMPLATES, &[])?;
        wire::parse_template_list(&self.get_text(&url)?)
    }

    fn get_template(&self, filename: &str) -> Result<TemplateRecord> {
        let url = self.endpoint_segment(super::EVAL_TEMPLATES, filename)?;
        match self.get_text(&url) {
            Err(EvalError::Status { code: 404, .. }) => Err(EvalError::NotFound(filename.into())),
            other => wire::parse_template_record(&other?),
        }
    }

    fn template_detail(&self, template_id: &str) -> Result<TemplateDetail> {
        let url = self.endpoint(super::TEMPLATE_DETAIL, &[("template_id", template_id)])?;
        let detail = wire::parse_template_detail(&self.get_text(&url)?)?;
        info!(
            template_id,
            pairs = detail.image_pairs.len(),
            axes = detail.axes.len(),
            "Fetched template detail"
        );
        Ok(detail)
    }

    fn get_image(&self, template_id: &str, filename: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(
            super::GET_IMAGE,
            &[("template_id", template_id), ("filename", filename)],
        )?;
        self.get_bytes(&url)
    }

    fn diff_image(
        &self,
        template_id: &str,
        img1: &str,
        img2: &str,
        threshold: Threshold,
    ) -> Result<Vec<u8>> {
        let threshold = threshold.to_string();
        let url = self.endpoint(
            super::DIFF_IMAGE,
            &[
                ("template_id", template_id),
                ("img1", img1),
                ("img2", img2),
                ("threshold", &threshold),
            ],
        )?;
        self.get_bytes(&url)
    }

    fn zoom_levels(&self) -> Result<Vec<f32>> {
        let url = self.endpoint(super::ZOOM_LEVELS, &[])?;
        wire::parse_zoom_levels(&self.get_text(&url)?)
    }

    fn load_evaluation(&self, template_id: &str, user_id: &str) -> Result<Option<SavedResults>> {
        let url = self.endpoint(
            super::LOAD_EVALUATION,
            &[("template_id", template_id), ("user_id", user_id)],
        )?;
        match self.get_text(&url) {
            Err(EvalError::Status { code: 404, .. }) => Ok(None),
            other => wire::parse_evaluation(&other?),
        }
    }

    fn save_evaluation(&self, record: &EvaluationRecord) -> Result<()> {
        let url = self.endpoint(super::SAVE_EVALUATION, &[])?;
        debug!(%url, "POST");
        self.agent.post(url.as_str()).send_json(record)?;
        info!(
            template_id = %record.template_id,
            user_id = %record.user_id,
            pairs = record.results.len(),
            "Saved evaluation"
        );
        Ok(())
    }
}
