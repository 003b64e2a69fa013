use std::path::Path;
use std::sync::mpsc;

use dentview_core::config::ServiceConfig;
use dentview_core::detection::Detection;
use dentview_core::service::InferenceClient;

use crate::messages::WorkerResult;

use super::{send, send_error, send_log};

pub(super) fn handle_analyze(
    path: &Path,
    service: &ServiceConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let client = InferenceClient::new(service);
    send_log(
        tx,
        ctx,
        format!("Uploading {} to {}", path.display(), client.base_url()),
    );
    match client.analyze(path) {
        Ok(analysis) => send(tx, ctx, WorkerResult::AnalysisComplete { analysis }),
        Err(e) => send_error(tx, ctx, format!("Analysis failed: {e}")),
    }
}

pub(super) fn handle_generate_report(
    image_id: &str,
    detections: &[Detection],
    service: &ServiceConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let client = InferenceClient::new(service);
    match client.generate_report(image_id, detections) {
        Ok(report) => send(tx, ctx, WorkerResult::ReportReady { report }),
        Err(e) => send_error(tx, ctx, format!("Report generation failed: {e}")),
    }
}
