use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{DentviewError, Result};

/// One inference result in the source image's native pixel space.
///
/// The box is center-anchored. Field names on the wire follow the inference
/// service (`class`, `x`, `y`); the descriptive names are accepted as aliases.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "class", alias = "label")]
    pub label: String,
    pub confidence: f64,
    #[serde(rename = "x", alias = "center_x")]
    pub center_x: f32,
    #[serde(rename = "y", alias = "center_y")]
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

impl Detection {
    pub fn new(
        label: impl Into<String>,
        confidence: f64,
        center_x: f32,
        center_y: f32,
        width: f32,
        height: f32,
    ) -> Self {
        Self {
            label: label.into(),
            confidence,
            center_x,
            center_y,
            width,
            height,
        }
    }

    /// Text drawn next to the box, e.g. `cavity (87.3%)`.
    pub fn label_text(&self) -> String {
        format!("{} ({}%)", self.label, one_decimal(self.confidence * 100.0))
    }

    /// True when the box has no positive area or carries non-finite geometry.
    pub fn is_degenerate(&self) -> bool {
        let finite = [self.center_x, self.center_y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite());
        !finite || self.width <= 0.0 || self.height <= 0.0
    }
}

/// `value` to one decimal place, rounding exact halves away from zero.
///
/// Plain `{:.1}` rounds ties to even. A double only lands exactly on a
/// one-decimal tie when it is an odd multiple of 0.25, so that case is
/// handled by hand and everything else uses the formatter.
fn one_decimal(value: f64) -> String {
    let quarters = value * 4.0;
    let is_tie = value.is_finite() && quarters.fract() == 0.0 && quarters % 2.0 != 0.0;
    if !is_tie {
        return format!("{value:.1}");
    }
    let tenths = (value.abs() * 10.0 + 0.5).floor();
    format!("{:.1}", value.signum() * tenths / 10.0)
}

/// Image size echoed back by the inference service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InferenceImage {
    pub width: u32,
    pub height: u32,
}

/// Response body of the prediction endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InferenceResponse {
    pub predictions: Vec<Detection>,
    #[serde(default)]
    pub image: Option<InferenceImage>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Error {
        error: String,
        #[serde(default)]
        details: Option<serde_json::Value>,
    },
    Response(InferenceResponse),
    Bare(Vec<Detection>),
}

/// Parse a prediction payload: a full service response, a bare list of
/// predictions, or the service's `{"error": ...}` body.
pub fn parse_inference_response(json: &str) -> Result<InferenceResponse> {
    match serde_json::from_str::<Payload>(json) {
        Ok(Payload::Response(resp)) => Ok(resp),
        Ok(Payload::Bare(predictions)) => Ok(InferenceResponse {
            predictions,
            image: None,
        }),
        Ok(Payload::Error { error, details }) => Err(DentviewError::Inference(match details {
            Some(serde_json::Value::String(d)) => format!("{error}: {d}"),
            Some(d) => format!("{error}: {d}"),
            None => error,
        })),
        // Re-run against the concrete type so the error names the bad field.
        Err(_) => serde_json::from_str::<InferenceResponse>(json).map_err(DentviewError::from),
    }
}

/// Count detections per label, most frequent first, ties by label.
pub fn summarize_labels(detections: &[Detection]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for det in detections {
        match counts.iter_mut().find(|(label, _)| *label == det.label) {
            Some((_, n)) => *n += 1,
            None => counts.push((det.label.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    counts
}

/// Read and parse a detections JSON file into a shareable sequence.
pub fn load_detections(path: &Path) -> Result<Arc<[Detection]>> {
    let contents = std::fs::read_to_string(path)?;
    let response = parse_inference_response(&contents)?;
    tracing::debug!(
        path = %path.display(),
        count = response.predictions.len(),
        "loaded detections"
    );
    Ok(response.predictions.into())
}
