use serde::Serialize;

use super::{estimate_text_width, Canvas};
use crate::color::Color;
use crate::geometry::{DisplayRect, ViewportSize};

/// One drawing operation as issued by a render pass.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Clear,
    Image {
        dest: DisplayRect,
    },
    StrokeRect {
        rect: DisplayRect,
        color: Color,
        line_width: f32,
    },
    FillRect {
        rect: DisplayRect,
        color: Color,
    },
    Text {
        text: String,
        x: f32,
        baseline: f32,
        color: Color,
    },
}

/// Canvas that keeps the list of operations making up the current composite.
///
/// `clear` discards earlier commands, so `commands()` always describes what
/// the surface shows. Text is measured with the fixed-advance estimate.
#[derive(Clone, Debug)]
pub struct RecordingCanvas {
    viewport: ViewportSize,
    font_size: f32,
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new(viewport: ViewportSize, font_size: f32) -> Self {
        Self {
            viewport,
            font_size,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of box outlines on the surface.
    pub fn box_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeRect { .. }))
            .count()
    }

    /// Label strings in draw order.
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn is_blank(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Canvas for RecordingCanvas {
    type Image = ();

    fn size(&self) -> ViewportSize {
        self.viewport
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_image(&mut self, _image: &(), dest: DisplayRect) {
        self.commands.push(DrawCommand::Image { dest });
    }

    fn stroke_rect(&mut self, rect: DisplayRect, color: Color, line_width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color,
            line_width,
        });
    }

    fn fill_rect(&mut self, rect: DisplayRect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn measure_text(&self, text: &str) -> f32 {
        estimate_text_width(text, self.font_size)
    }

    fn fill_text(&mut self, text: &str, x: f32, baseline: f32, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            baseline,
            color,
        });
    }
}
