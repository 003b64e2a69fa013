//! Blocking client for the inference backend.
//!
//! The backend converts uploaded radiographs to PNG, runs detection on a
//! stored image and writes a short report from a list of annotations.
//! No request is retried.

pub mod multipart;

use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use image::RgbaImage;
use serde::Deserialize;

use crate::config::ServiceConfig;
use crate::consts::NO_FINDINGS_REPORT;
use crate::detection::{parse_inference_response, Detection, InferenceResponse};
use crate::error::{DentviewError, Result};
use crate::io::decode_bytes;
use crate::source::ImageRef;

#[derive(Deserialize)]
struct UploadResponse {
    image_id: String,
}

#[derive(Deserialize)]
struct ReportResponse {
    report: String,
}

/// An uploaded image together with its detections.
#[derive(Clone, Debug)]
pub struct Analysis {
    pub image_id: String,
    pub image_ref: ImageRef,
    pub detections: Arc<[Detection]>,
}

pub struct InferenceClient {
    agent: ureq::Agent,
    base_url: String,
}

impl InferenceClient {
    pub fn new(config: &ServiceConfig) -> Self {
        Self {
            agent: build_agent(config.timeout_secs),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of an endpoint path such as `predict/`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// URL the backend serves the converted PNG from.
    pub fn image_url(&self, image_id: &str) -> String {
        self.endpoint(&format!("get-image/{image_id}"))
    }

    pub fn image_ref(&self, image_id: &str) -> ImageRef {
        ImageRef::Url(self.image_url(image_id))
    }

    /// Upload a radiograph; returns the backend's image id.
    pub fn upload(&self, path: &Path) -> Result<String> {
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.dcm".to_string());
        let body = multipart::file_part(&multipart::unique_boundary(), "file", &filename, &data);

        tracing::info!(path = %path.display(), bytes = data.len(), "uploading radiograph");
        let response = self
            .agent
            .post(&self.endpoint("upload-dicom/"))
            .set("Content-Type", &body.content_type())
            .send_bytes(&body.bytes)
            .map_err(map_ureq_error)?;
        let parsed: UploadResponse = response.into_json()?;
        tracing::debug!(image_id = %parsed.image_id, "upload accepted");
        Ok(parsed.image_id)
    }

    /// Run detection on a stored image.
    pub fn predict(&self, image_id: &str) -> Result<InferenceResponse> {
        let response = self
            .agent
            .post(&self.endpoint("predict/"))
            .send_json(serde_json::json!({ "image_id": image_id }))
            .map_err(map_ureq_error)?;
        let body = response.into_string()?;
        let parsed = parse_inference_response(&body)?;
        tracing::info!(image_id, detections = parsed.predictions.len(), "prediction received");
        Ok(parsed)
    }

    /// Upload then predict.
    pub fn analyze(&self, path: &Path) -> Result<Analysis> {
        let image_id = self.upload(path)?;
        let response = self.predict(&image_id)?;
        Ok(Analysis {
            image_ref: self.image_ref(&image_id),
            image_id,
            detections: response.predictions.into(),
        })
    }

    /// Ask the backend for a written report. An empty detection list is
    /// answered locally without a request.
    pub fn generate_report(&self, image_id: &str, detections: &[Detection]) -> Result<String> {
        if detections.is_empty() {
            return Ok(NO_FINDINGS_REPORT.to_string());
        }
        let response = self
            .agent
            .post(&self.endpoint("generate-report/"))
            .send_json(serde_json::json!({
                "image_id": image_id,
                "annotations": detections,
            }))
            .map_err(map_ureq_error)?;
        let parsed: ReportResponse = response.into_json()?;
        Ok(parsed.report)
    }

    pub fn fetch_image(&self, image_id: &str) -> Result<RgbaImage> {
        let bytes = read_body(
            self.agent
                .get(&self.image_url(image_id))
                .call()
                .map_err(map_ureq_error)?,
        )?;
        decode_bytes(&bytes)
    }
}

/// GET `url` and return the raw body.
pub fn fetch_bytes(url: &str, timeout_secs: Option<u64>) -> Result<Vec<u8>> {
    let response = build_agent(timeout_secs)
        .get(url)
        .call()
        .map_err(map_ureq_error)?;
    read_body(response)
}

fn build_agent(timeout_secs: Option<u64>) -> ureq::Agent {
    let mut builder = ureq::AgentBuilder::new();
    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    builder.build()
}

fn read_body(response: ureq::Response) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    response.into_reader().read_to_end(&mut bytes)?;
    if bytes.is_empty() {
        return Err(DentviewError::Service("empty response body".into()));
    }
    Ok(bytes)
}

fn map_ureq_error(e: ureq::Error) -> DentviewError {
    match e {
        ureq::Error::Status(code, response) => {
            let url = response.get_url().to_string();
            let body = response.into_string().unwrap_or_default();
            DentviewError::Service(format!("{url} returned HTTP {code}: {body}"))
        }
        other => DentviewError::Service(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(url: &str) -> InferenceClient {
        InferenceClient::new(&ServiceConfig {
            base_url: url.to_string(),
            timeout_secs: Some(1),
        })
    }

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let c = client("http://localhost:8000/");
        assert_eq!(c.endpoint("/predict/"), "http://localhost:8000/predict/");
        assert_eq!(c.image_url("abc"), "http://localhost:8000/get-image/abc");
    }

    #[test]
    fn test_empty_report_is_local() {
        // Unroutable address: a network call would fail.
        let c = client("http://127.0.0.1:9");
        let report = c.generate_report("id", &[]).unwrap();
        assert_eq!(report, NO_FINDINGS_REPORT);
    }
}
