pub mod label;
pub mod viewport;

pub use label::{layout_label, LabelLayout};
pub use viewport::{AnnotatedViewport, LoadState, LoadTicket, PassOutcome, SkipReason};

use serde::Serialize;

use crate::canvas::Canvas;
use crate::config::OverlayStyle;
use crate::detection::Detection;
use crate::geometry::Transform;
use crate::source::SourceImage;

/// What one completed render pass drew.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PassSummary {
    pub transform: Transform,
    pub overlays: usize,
    /// Overlays whose box had no positive area.
    pub degenerate: usize,
}

/// Clear the canvas, draw `image` letterboxed into it, then one overlay per
/// detection in order.
pub fn render_pass<C: Canvas>(
    canvas: &mut C,
    image: &SourceImage<C::Image>,
    detections: &[Detection],
    style: &OverlayStyle,
) -> PassSummary {
    canvas.clear();

    let transform = Transform::fit(image.size(), canvas.size());
    canvas.draw_image(image.handle(), transform.image_rect(image.size()));

    let mut degenerate = 0;
    for detection in detections {
        if detection.is_degenerate() {
            tracing::debug!(label = %detection.label, "degenerate detection box");
            degenerate += 1;
        }
        draw_overlay(canvas, &transform, detection, style);
    }

    tracing::debug!(
        scale = transform.scale,
        overlays = detections.len(),
        degenerate,
        "render pass complete"
    );

    PassSummary {
        transform,
        overlays: detections.len(),
        degenerate,
    }
}

/// Box outline, then label background, then label text.
pub fn draw_overlay<C: Canvas>(
    canvas: &mut C,
    transform: &Transform,
    detection: &Detection,
    style: &OverlayStyle,
) -> LabelLayout {
    let bbox = transform.map_detection(detection);
    canvas.stroke_rect(bbox, style.box_color, style.box_line_width);

    let text = detection.label_text();
    let width = canvas.measure_text(&text);
    let layout = layout_label(bbox, text, width, style);

    canvas.fill_rect(layout.background, style.label_background);
    canvas.fill_text(
        &layout.text,
        layout.text_x,
        layout.baseline,
        style.label_text_color,
    );
    layout
}
