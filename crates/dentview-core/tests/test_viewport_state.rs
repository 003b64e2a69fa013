use dentview_core::config::EmptyDetectionsPolicy;
use dentview_core::error::DentviewError;
use dentview_core::render::{LoadState, LoadTicket, PassOutcome, SkipReason};
use dentview_core::source::SourceImage;

mod common;
use common::{det, dets, image_ref, placeholder, recording_viewport};

fn expect_ticket(outcome: PassOutcome) -> LoadTicket {
    match outcome {
        PassOutcome::LoadRequested(ticket) => ticket,
        other => panic!("expected a load request, got {other:?}"),
    }
}

fn ok(w: u32, h: u32) -> Result<SourceImage<()>, DentviewError> {
    Ok(placeholder(w, h))
}

// ---------------------------------------------------------------------------
// Input guard
// ---------------------------------------------------------------------------

#[test]
fn test_empty_image_ref_draws_nothing() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let outcome = vp.set_inputs(None, dets(vec![det("cavity", 0.9, 10.0, 10.0, 5.0, 5.0)]));
    assert_eq!(outcome, PassOutcome::Skipped(SkipReason::EmptyImageRef));
    assert!(vp.canvas().is_blank());
    assert_eq!(vp.passes(), 0);
}

#[test]
fn test_empty_detections_skip_policy_draws_nothing() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::Skip);
    let outcome = vp.set_inputs(image_ref("a.png"), dets(vec![]));
    assert_eq!(outcome, PassOutcome::Skipped(SkipReason::NoDetections));
    assert_eq!(vp.state(), LoadState::Unloaded);
    assert!(vp.canvas().is_blank());
}

#[test]
fn test_empty_detections_image_only_policy_draws_image() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let ticket = expect_ticket(vp.set_inputs(image_ref("a.png"), dets(vec![])));
    match vp.complete_load(ticket, ok(800, 600)) {
        PassOutcome::Rendered(summary) => assert_eq!(summary.overlays, 0),
        other => panic!("expected render, got {other:?}"),
    }
    assert_eq!(vp.canvas().box_count(), 0);
    assert_eq!(vp.canvas().commands().len(), 2);
}

// ---------------------------------------------------------------------------
// Load lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_load_then_render() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let detections = dets(vec![det("cavity", 0.873, 500.0, 400.0, 200.0, 100.0)]);

    let ticket = expect_ticket(vp.set_inputs(image_ref("a.png"), detections));
    assert!(matches!(vp.state(), LoadState::Loading { .. }));
    assert!(vp.canvas().is_blank());
    assert!(vp.transform().is_none());

    let outcome = vp.complete_load(ticket, ok(1000, 800));
    assert!(matches!(outcome, PassOutcome::Rendered(_)));
    assert_eq!(vp.state(), LoadState::Ready);
    assert_eq!(vp.canvas().texts(), vec!["cavity (87.3%)"]);
    assert_eq!(vp.passes(), 1);

    let t = vp.transform().unwrap();
    assert!((t.scale - 0.4).abs() < 1e-6);
}

#[test]
fn test_identical_inputs_do_not_redraw() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let detections = dets(vec![det("cavity", 0.5, 10.0, 10.0, 5.0, 5.0)]);
    let ticket = expect_ticket(vp.set_inputs(image_ref("a.png"), detections.clone()));
    vp.complete_load(ticket, ok(100, 100));

    assert_eq!(
        vp.set_inputs(image_ref("a.png"), detections),
        PassOutcome::Unchanged
    );
    assert_eq!(vp.passes(), 1);
}

#[test]
fn test_new_detections_on_loaded_image_render_synchronously() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let ticket = expect_ticket(vp.set_inputs(
        image_ref("a.png"),
        dets(vec![det("first", 0.5, 10.0, 10.0, 5.0, 5.0)]),
    ));
    vp.complete_load(ticket, ok(100, 100));

    // Equal contents, new sequence identity: still a new pass.
    let outcome = vp.set_inputs(
        image_ref("a.png"),
        dets(vec![det("second", 0.5, 10.0, 10.0, 5.0, 5.0)]),
    );
    assert!(matches!(outcome, PassOutcome::Rendered(_)));
    assert_eq!(vp.canvas().texts(), vec!["second (50.0%)"]);
    assert_eq!(vp.passes(), 2);
}

#[test]
fn test_superseded_load_is_discarded() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let stale = expect_ticket(vp.set_inputs(
        image_ref("a.png"),
        dets(vec![det("stale", 0.5, 10.0, 10.0, 5.0, 5.0)]),
    ));
    let current = expect_ticket(vp.set_inputs(
        image_ref("b.png"),
        dets(vec![det("current", 0.5, 10.0, 10.0, 5.0, 5.0)]),
    ));
    assert!(current.generation() > stale.generation());

    assert_eq!(vp.complete_load(stale, ok(100, 100)), PassOutcome::Stale);
    assert!(vp.canvas().is_blank());

    assert!(matches!(
        vp.complete_load(current, ok(100, 100)),
        PassOutcome::Rendered(_)
    ));
    assert_eq!(vp.canvas().texts(), vec!["current (50.0%)"]);
}

#[test]
fn test_detection_change_during_load_draws_only_final_sequence_once() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let ticket = expect_ticket(vp.set_inputs(
        image_ref("a.png"),
        dets(vec![det("early", 0.5, 10.0, 10.0, 5.0, 5.0)]),
    ));
    assert_eq!(
        vp.set_inputs(
            image_ref("a.png"),
            dets(vec![det("middle", 0.5, 10.0, 10.0, 5.0, 5.0)]),
        ),
        PassOutcome::AwaitingLoad
    );
    assert_eq!(
        vp.set_inputs(
            image_ref("a.png"),
            dets(vec![det("final", 0.5, 10.0, 10.0, 5.0, 5.0)]),
        ),
        PassOutcome::AwaitingLoad
    );

    assert!(matches!(
        vp.complete_load(ticket.clone(), ok(100, 100)),
        PassOutcome::Rendered(_)
    ));
    assert_eq!(vp.canvas().texts(), vec!["final (50.0%)"]);
    assert_eq!(vp.passes(), 1);

    // Delivering the same ticket twice does not draw again.
    assert_eq!(vp.complete_load(ticket, ok(100, 100)), PassOutcome::Stale);
    assert_eq!(vp.passes(), 1);
}

#[test]
fn test_switching_back_to_cached_image_renders_without_load() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let detections = dets(vec![det("cavity", 0.5, 10.0, 10.0, 5.0, 5.0)]);
    let a = expect_ticket(vp.set_inputs(image_ref("a.png"), detections.clone()));
    vp.complete_load(a, ok(100, 100));

    let b = expect_ticket(vp.set_inputs(image_ref("b.png"), detections.clone()));
    assert!(matches!(
        vp.set_inputs(image_ref("a.png"), detections),
        PassOutcome::Rendered(_)
    ));
    assert_eq!(vp.complete_load(b, ok(100, 100)), PassOutcome::Stale);
    assert_eq!(vp.state(), LoadState::Ready);
}

// ---------------------------------------------------------------------------
// Load failure
// ---------------------------------------------------------------------------

#[test]
fn test_load_failure_leaves_previous_composite() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let a = expect_ticket(vp.set_inputs(
        image_ref("a.png"),
        dets(vec![det("kept", 0.5, 10.0, 10.0, 5.0, 5.0)]),
    ));
    vp.complete_load(a, ok(100, 100));
    let before = vp.canvas().commands().to_vec();

    let b = expect_ticket(vp.set_inputs(
        image_ref("broken.png"),
        dets(vec![det("lost", 0.5, 10.0, 10.0, 5.0, 5.0)]),
    ));
    let outcome = vp.complete_load(
        b,
        Err::<SourceImage<()>, _>(DentviewError::UnsupportedSource("broken".into())),
    );
    assert_eq!(outcome, PassOutcome::LoadFailed);
    assert_eq!(vp.state(), LoadState::Failed);
    assert_eq!(vp.canvas().commands(), before.as_slice());
}

#[test]
fn test_failed_image_is_retried_on_next_input_change() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let first = expect_ticket(vp.set_inputs(
        image_ref("flaky.png"),
        dets(vec![det("a", 0.5, 10.0, 10.0, 5.0, 5.0)]),
    ));
    vp.complete_load(first, Err::<SourceImage<()>, _>("timed out"));

    let retry = expect_ticket(vp.set_inputs(
        image_ref("flaky.png"),
        dets(vec![det("b", 0.5, 10.0, 10.0, 5.0, 5.0)]),
    ));
    assert!(matches!(
        vp.complete_load(retry, ok(100, 100)),
        PassOutcome::Rendered(_)
    ));
}

#[test]
fn test_stale_failure_is_ignored() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let detections = dets(vec![det("a", 0.5, 10.0, 10.0, 5.0, 5.0)]);
    let old = expect_ticket(vp.set_inputs(image_ref("old.png"), detections.clone()));
    let new = expect_ticket(vp.set_inputs(image_ref("new.png"), detections));

    assert_eq!(
        vp.complete_load(old, Err::<SourceImage<()>, _>("gone")),
        PassOutcome::Stale
    );
    assert!(matches!(vp.state(), LoadState::Loading { .. }));
    assert!(matches!(
        vp.complete_load(new, ok(10, 10)),
        PassOutcome::Rendered(_)
    ));
}

#[test]
fn test_clearing_image_ref_supersedes_pending_load() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let detections = dets(vec![det("a", 0.5, 10.0, 10.0, 5.0, 5.0)]);
    let ticket = expect_ticket(vp.set_inputs(image_ref("a.png"), detections.clone()));
    assert_eq!(
        vp.set_inputs(None, detections),
        PassOutcome::Skipped(SkipReason::EmptyImageRef)
    );
    assert_eq!(vp.complete_load(ticket, ok(10, 10)), PassOutcome::Stale);
    assert!(vp.canvas().is_blank());
}

#[test]
fn test_render_with_runs_loader_inline() {
    let mut vp = recording_viewport(EmptyDetectionsPolicy::ImageOnly);
    let mut calls = 0;
    let outcome = vp.render_with(
        image_ref("a.png"),
        dets(vec![det("cavity", 0.5, 10.0, 10.0, 5.0, 5.0)]),
        |_| {
            calls += 1;
            SourceImage::new((), 20, 10)
        },
    );
    assert!(matches!(outcome, PassOutcome::Rendered(_)));
    assert_eq!(calls, 1);
}

#[test]
fn test_source_image_rejects_zero_dimensions() {
    assert!(matches!(
        SourceImage::new((), 0, 5),
        Err(DentviewError::InvalidDimensions { .. })
    ));
}
