use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use dentview_core::detection::load_detections;
use dentview_core::io::load_source_image;
use dentview_core::render::LoadTicket;

use crate::messages::WorkerResult;

use super::{send, send_error};

pub(super) fn handle_load_image(
    ticket: LoadTicket,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    let start = Instant::now();
    match load_source_image(ticket.image()) {
        Ok(image) => {
            tracing::info!(
                image = %ticket.image(),
                generation = ticket.generation(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "image decoded"
            );
            send(tx, ctx, WorkerResult::ImageLoaded { ticket, image });
        }
        Err(e) => {
            let message = format!("Failed to load {}: {e}", ticket.image());
            send(tx, ctx, WorkerResult::ImageLoadFailed { ticket, message });
        }
    }
}

pub(super) fn handle_load_detections(
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match load_detections(path) {
        Ok(detections) => send(
            tx,
            ctx,
            WorkerResult::DetectionsLoaded {
                path: path.to_path_buf(),
                detections,
            },
        ),
        Err(e) => send_error(
            tx,
            ctx,
            format!("Failed to read detections {}: {e}", path.display()),
        ),
    }
}
