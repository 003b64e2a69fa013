use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::consts::{
    DEFAULT_BOX_LINE_WIDTH, DEFAULT_FONT_FAMILIES, DEFAULT_FONT_SIZE, DEFAULT_LABEL_BOX_HEIGHT,
    DEFAULT_LABEL_MARGIN, DEFAULT_LABEL_PADDING, DEFAULT_LABEL_RISE, DEFAULT_SERVICE_URL,
};
use crate::geometry::ViewportSize;

/// Everything a renderer and its collaborators need, as stored in TOML.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub empty_detections: EmptyDetectionsPolicy,
    #[serde(default)]
    pub viewport: ViewportSize,
    #[serde(default)]
    pub style: OverlayStyle,
    #[serde(default)]
    pub service: ServiceConfig,
}

/// What a render pass does when the detection sequence is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyDetectionsPolicy {
    /// Draw the scaled image with no overlays.
    #[default]
    ImageOnly,
    /// Leave the surface untouched.
    Skip,
}

impl std::fmt::Display for EmptyDetectionsPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ImageOnly => write!(f, "Image only"),
            Self::Skip => write!(f, "Skip"),
        }
    }
}

/// Font used for detection labels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Pixel size.
    pub size: f32,
    /// Families tried in order.
    pub families: Vec<String>,
    /// Explicit font file, tried before any family lookup.
    pub path: Option<PathBuf>,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size: DEFAULT_FONT_SIZE,
            families: DEFAULT_FONT_FAMILIES.iter().map(|s| s.to_string()).collect(),
            path: None,
        }
    }
}

/// Visual parameters of the box and label overlays.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub box_color: Color,
    pub box_line_width: f32,
    pub label_background: Color,
    pub label_text_color: Color,
    /// Inset of the label from the box's right and bottom edges.
    pub label_margin: f32,
    /// Horizontal padding around the text inside its background.
    pub label_padding: f32,
    /// Baseline-to-top distance of the label background.
    pub label_rise: f32,
    pub label_box_height: f32,
    pub font: FontSpec,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            box_color: Color::GREEN,
            box_line_width: DEFAULT_BOX_LINE_WIDTH,
            label_background: Color::GREEN.with_opacity(0.7),
            label_text_color: Color::BLACK,
            label_margin: DEFAULT_LABEL_MARGIN,
            label_padding: DEFAULT_LABEL_PADDING,
            label_rise: DEFAULT_LABEL_RISE,
            label_box_height: DEFAULT_LABEL_BOX_HEIGHT,
            font: FontSpec::default(),
        }
    }
}

/// Location of the inference backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    /// Per-request timeout in seconds; `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout_secs: Some(120),
        }
    }
}
