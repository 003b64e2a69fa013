use std::fmt;
use std::sync::Arc;

use crate::canvas::Canvas;
use crate::config::{EmptyDetectionsPolicy, OverlayStyle, RenderConfig};
use crate::detection::Detection;
use crate::error::Result;
use crate::geometry::Transform;
use crate::source::{ImageRef, SourceImage};

use super::{render_pass, PassSummary};

/// Load lifecycle of the current source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loading { generation: u64 },
    Ready,
    Failed,
}

impl fmt::Display for LoadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unloaded => write!(f, "Unloaded"),
            Self::Loading { generation } => write!(f, "Loading (#{generation})"),
            Self::Ready => write!(f, "Ready"),
            Self::Failed => write!(f, "Failed"),
        }
    }
}

/// Request to decode an image, handed to whoever owns image loading.
/// Only the ticket of the latest request is honoured on completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    image: ImageRef,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn image(&self) -> &ImageRef {
        &self.image
    }
}

/// Why a pass was not drawn even though inputs changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    EmptyImageRef,
    NoDetections,
}

/// Result of feeding inputs or a load completion to the viewport.
#[derive(Clone, Debug, PartialEq)]
pub enum PassOutcome {
    /// Same image reference and same detection sequence as before.
    Unchanged,
    /// Input guard: nothing drawn, surface left as it was.
    Skipped(SkipReason),
    /// The image must be loaded; pass the ticket back to `complete_load`.
    LoadRequested(LoadTicket),
    /// A load for the same image is already in flight and will draw the
    /// latest detections.
    AwaitingLoad,
    Rendered(PassSummary),
    /// Completion for a ticket that inputs have since superseded.
    Stale,
    /// The image could not be loaded; surface left as it was.
    LoadFailed,
}

/// Fixed-size viewport that renders one image with its detections.
///
/// Owns the drawing surface. Inputs are the image reference and the
/// detection sequence; a new pass runs whenever either identity changes.
pub struct AnnotatedViewport<C: Canvas> {
    canvas: C,
    style: OverlayStyle,
    empty_detections: EmptyDetectionsPolicy,
    image_ref: Option<ImageRef>,
    detections: Arc<[Detection]>,
    state: LoadState,
    /// Decoded image for `loaded_ref`.
    image: Option<SourceImage<C::Image>>,
    loaded_ref: Option<ImageRef>,
    next_generation: u64,
    passes: u64,
}

impl<C: Canvas> AnnotatedViewport<C> {
    pub fn new(canvas: C, style: OverlayStyle, empty_detections: EmptyDetectionsPolicy) -> Self {
        Self {
            canvas,
            style,
            empty_detections,
            image_ref: None,
            detections: Arc::from(Vec::new()),
            state: LoadState::Unloaded,
            image: None,
            loaded_ref: None,
            next_generation: 1,
            passes: 0,
        }
    }

    pub fn from_config(canvas: C, config: &RenderConfig) -> Self {
        Self::new(canvas, config.style.clone(), config.empty_detections)
    }

    /// The composite.
    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn into_canvas(self) -> C {
        self.canvas
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn image_ref(&self) -> Option<&ImageRef> {
        self.image_ref.as_ref()
    }

    pub fn detections(&self) -> &Arc<[Detection]> {
        &self.detections
    }

    /// Number of passes drawn so far.
    pub fn passes(&self) -> u64 {
        self.passes
    }

    /// Transform of the current image, once it is loaded.
    pub fn transform(&self) -> Option<Transform> {
        if self.state != LoadState::Ready {
            return None;
        }
        self.image
            .as_ref()
            .map(|img| Transform::fit(img.size(), self.canvas.size()))
    }

    /// Supply new inputs. Draws synchronously when the image is already
    /// decoded, otherwise asks for a load.
    pub fn set_inputs(
        &mut self,
        image_ref: Option<ImageRef>,
        detections: Arc<[Detection]>,
    ) -> PassOutcome {
        let image_changed = self.image_ref != image_ref;
        if !image_changed && Arc::ptr_eq(&self.detections, &detections) {
            return PassOutcome::Unchanged;
        }
        self.image_ref = image_ref;
        self.detections = detections;

        if image_changed {
            // Any load in flight belongs to the previous reference.
            self.state = if self.current_is_cached() {
                LoadState::Ready
            } else {
                LoadState::Unloaded
            };
        }

        if let Some(reason) = self.guard() {
            tracing::debug!(?reason, "render pass skipped");
            return PassOutcome::Skipped(reason);
        }

        match self.state {
            LoadState::Ready => self.draw_current(),
            LoadState::Loading { .. } => PassOutcome::AwaitingLoad,
            LoadState::Unloaded | LoadState::Failed => self.request_load(),
        }
    }

    /// Deliver the result of a load requested with `ticket`.
    pub fn complete_load<E: fmt::Display>(
        &mut self,
        ticket: LoadTicket,
        result: std::result::Result<SourceImage<C::Image>, E>,
    ) -> PassOutcome {
        match self.state {
            LoadState::Loading { generation } if generation == ticket.generation => {}
            _ => {
                tracing::debug!(
                    generation = ticket.generation,
                    image = %ticket.image,
                    "discarding stale image load"
                );
                return PassOutcome::Stale;
            }
        }

        match result {
            Ok(image) => {
                self.image = Some(image);
                self.loaded_ref = Some(ticket.image);
                self.state = LoadState::Ready;
                match self.guard() {
                    Some(reason) => PassOutcome::Skipped(reason),
                    None => self.draw_current(),
                }
            }
            Err(e) => {
                tracing::warn!(image = %ticket.image, "image failed to load: {e}");
                self.image = None;
                self.loaded_ref = None;
                self.state = LoadState::Failed;
                PassOutcome::LoadFailed
            }
        }
    }

    /// Set inputs and, if a load is needed, run `load` inline. For callers
    /// without an event loop.
    pub fn render_with<F>(
        &mut self,
        image_ref: Option<ImageRef>,
        detections: Arc<[Detection]>,
        load: F,
    ) -> PassOutcome
    where
        F: FnOnce(&ImageRef) -> Result<SourceImage<C::Image>>,
    {
        match self.set_inputs(image_ref, detections) {
            PassOutcome::LoadRequested(ticket) => {
                let result = load(ticket.image());
                self.complete_load(ticket, result)
            }
            other => other,
        }
    }

    fn current_is_cached(&self) -> bool {
        self.image.is_some() && self.image_ref.is_some() && self.loaded_ref == self.image_ref
    }

    fn guard(&self) -> Option<SkipReason> {
        if self.image_ref.is_none() {
            return Some(SkipReason::EmptyImageRef);
        }
        if self.detections.is_empty() && self.empty_detections == EmptyDetectionsPolicy::Skip {
            return Some(SkipReason::NoDetections);
        }
        None
    }

    fn request_load(&mut self) -> PassOutcome {
        let Some(image) = self.image_ref.clone() else {
            return PassOutcome::Skipped(SkipReason::EmptyImageRef);
        };
        let generation = self.next_generation;
        self.next_generation += 1;
        self.state = LoadState::Loading { generation };
        tracing::debug!(generation, image = %image, "image load requested");
        PassOutcome::LoadRequested(LoadTicket { generation, image })
    }

    fn draw_current(&mut self) -> PassOutcome {
        let Some(image) = self.image.as_ref() else {
            return self.request_load();
        };
        let summary = render_pass(&mut self.canvas, image, &self.detections, &self.style);
        self.passes += 1;
        PassOutcome::Rendered(summary)
    }
}
