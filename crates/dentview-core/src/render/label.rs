use serde::Serialize;

use crate::config::OverlayStyle;
use crate::geometry::DisplayRect;

/// Placement of a label and its background inside a detection box.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LabelLayout {
    pub text: String,
    pub text_width: f32,
    pub text_x: f32,
    pub baseline: f32,
    pub background: DisplayRect,
}

/// Anchor the label at the bottom-right corner of `bbox`, inset by the
/// style's margin, with a padded background behind the text.
///
/// Overlapping boxes yield overlapping labels; the later draw wins.
pub fn layout_label(
    bbox: DisplayRect,
    text: String,
    text_width: f32,
    style: &OverlayStyle,
) -> LabelLayout {
    let text_x = bbox.right() - text_width - style.label_margin;
    let baseline = bbox.bottom() - style.label_margin;
    let background = DisplayRect::new(
        text_x - style.label_padding,
        baseline - style.label_rise,
        text_width + 2.0 * style.label_padding,
        style.label_box_height,
    );
    LabelLayout {
        text,
        text_width,
        text_x,
        baseline,
        background,
    }
}
