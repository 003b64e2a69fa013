/// Default viewport width in logical units.
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 400.0;

/// Default viewport height in logical units.
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 400.0;

/// Default bounding box outline width.
pub const DEFAULT_BOX_LINE_WIDTH: f32 = 2.0;

/// Default label font size in pixels.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Inset of the label from the right and bottom edges of its box.
pub const DEFAULT_LABEL_MARGIN: f32 = 8.0;

/// Horizontal padding between the label text and its background edge.
pub const DEFAULT_LABEL_PADDING: f32 = 4.0;

/// Distance from the text baseline up to the top of the label background.
pub const DEFAULT_LABEL_RISE: f32 = 18.0;

/// Height of the label background rectangle.
pub const DEFAULT_LABEL_BOX_HEIGHT: f32 = 22.0;

/// Advance per character, as a fraction of the font size, used when no font
/// is available to measure text.
pub const FALLBACK_ADVANCE_EM: f32 = 0.6;

/// Font families tried in order when resolving the label font.
pub const DEFAULT_FONT_FAMILIES: [&str; 2] = ["Segoe UI", "Arial"];

/// Maximum directory depth walked when searching platform font directories.
pub const FONT_SEARCH_MAX_DEPTH: usize = 4;

/// Default base URL of the inference backend.
pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";

/// Report returned when there is nothing to describe.
pub const NO_FINDINGS_REPORT: &str = "No pathologies detected in the image.";
