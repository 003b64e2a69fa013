use std::path::PathBuf;
use std::sync::Arc;

use dentview_core::config::{RenderConfig, ServiceConfig};
use dentview_core::detection::Detection;
use dentview_core::render::LoadTicket;
use dentview_core::service::Analysis;
use dentview_core::source::SourceImage;
use image::RgbaImage;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Decode the image named by a viewport load ticket.
    LoadImage { ticket: LoadTicket },

    /// Read a detections JSON file.
    LoadDetections { path: PathBuf },

    /// Upload a radiograph and run detection on it.
    Analyze {
        path: PathBuf,
        service: ServiceConfig,
    },

    /// Ask the backend for a written report on the current findings.
    GenerateReport {
        image_id: String,
        detections: Arc<[Detection]>,
        service: ServiceConfig,
    },
}

/// Results sent from worker (or dialog) threads back to UI thread.
pub enum WorkerResult {
    ImageLoaded {
        ticket: LoadTicket,
        image: SourceImage<RgbaImage>,
    },
    ImageLoadFailed {
        ticket: LoadTicket,
        message: String,
    },

    /// A radiograph was chosen in the open dialog.
    ImagePicked { path: PathBuf },

    DetectionsLoaded {
        path: PathBuf,
        detections: Arc<[Detection]>,
    },
    AnalysisComplete { analysis: Analysis },
    ReportReady { report: String },

    ConfigImported { config: Box<RenderConfig> },
    CompositeSaved { path: PathBuf },
    Error { message: String },
    Log { message: String },
}
