use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dentview_core::detection::Detection;
use dentview_core::render::PassOutcome;
use dentview_core::source::ImageRef;

/// Long-running task shown in the status bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BusyTask {
    LoadingImage,
    Analyzing,
    Reporting,
}

impl fmt::Display for BusyTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadingImage => write!(f, "Loading image"),
            Self::Analyzing => write!(f, "Analyzing"),
            Self::Reporting => write!(f, "Generating report"),
        }
    }
}

/// Overall UI state. `image_ref` and `detections` are the two viewport
/// inputs; everything else is presentation.
pub struct UIState {
    pub image_ref: Option<ImageRef>,
    pub detections: Arc<[Detection]>,
    pub detections_path: Option<PathBuf>,

    /// Backend id of the uploaded radiograph, once analyzed.
    pub image_id: Option<String>,
    pub report: Option<String>,

    pub busy: Option<BusyTask>,
    pub log_messages: Vec<String>,

    /// Pointer position in source image pixels.
    pub hover_image_pos: Option<(f32, f32)>,
}

impl Default for UIState {
    fn default() -> Self {
        Self {
            image_ref: None,
            detections: Arc::from(Vec::new()),
            detections_path: None,
            image_id: None,
            report: None,
            busy: None,
            log_messages: Vec::new(),
            hover_image_pos: None,
        }
    }
}

impl UIState {
    pub fn is_busy(&self) -> bool {
        self.busy.is_some()
    }

    /// Clear the busy marker if `task` is the one running.
    pub fn finish(&mut self, task: BusyTask) {
        if self.busy == Some(task) {
            self.busy = None;
        }
    }

    /// Clear the image-load marker unless `outcome` came from a superseded load.
    pub fn finish_load(&mut self, outcome: &PassOutcome) {
        if *outcome != PassOutcome::Stale {
            self.finish(BusyTask::LoadingImage);
        }
    }

    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    /// Local file behind the current image, if it is not a backend URL.
    pub fn local_image_path(&self) -> Option<PathBuf> {
        self.image_ref
            .as_ref()
            .and_then(|r| r.as_path())
            .map(|p| p.to_path_buf())
    }
}

/// Viewport display state.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
    /// Render pass the texture was uploaded from.
    pub uploaded_pass: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_load_keeps_busy_marker() {
        let mut state = UIState::default();
        state.busy = Some(BusyTask::LoadingImage);
        state.finish_load(&PassOutcome::Stale);
        assert_eq!(state.busy, Some(BusyTask::LoadingImage));
        state.finish_load(&PassOutcome::LoadFailed);
        assert_eq!(state.busy, None);
    }

    #[test]
    fn test_finish_only_clears_matching_task() {
        let mut state = UIState::default();
        state.busy = Some(BusyTask::Analyzing);
        state.finish_load(&PassOutcome::AwaitingLoad);
        assert_eq!(state.busy, Some(BusyTask::Analyzing));
        state.finish(BusyTask::Analyzing);
        assert!(!state.is_busy());
    }
}
