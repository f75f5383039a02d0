// Host-side tests for asset progress tracking and the overlay timeline.

use viewer_core::{
    ease_out_quad, LoadEvent, LoadTracker, OverlayTimeline, ViewerError, OVERLAY_FADE_DURATION_SEC,
    OVERLAY_START_DELAY_SEC, SCENE_READY_DELAY_SEC,
};

fn tracker_with(urls: &[&str]) -> LoadTracker {
    let mut t = LoadTracker::new();
    for u in urls {
        t.item_start(*u);
    }
    t
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn progress_reports_running_ratio() {
    let urls: Vec<String> = (0..10).map(|i| format!("/a/{i}")).collect();
    let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
    let mut tracker = tracker_with(&refs);
    let mut timeline = OverlayTimeline::new();

    let mut seen = Vec::new();
    for url in &refs {
        for ev in tracker.item_end(url).unwrap() {
            if let LoadEvent::Progress { loaded, total, .. } = ev {
                timeline.set_progress(loaded, total);
                seen.push(timeline.bar_scale());
            }
        }
    }
    assert!(approx(seen[0], 0.1));
    assert!(approx(seen[4], 0.5));
    assert!(approx(seen[9], 1.0));
}

#[test]
fn completion_fires_once_after_last_item() {
    let mut tracker = tracker_with(&["/m.glb", "/px.jpg"]);
    let first = tracker.item_end("/m.glb").unwrap();
    assert!(!first.iter().any(|e| matches!(e, LoadEvent::Complete { .. })));
    assert!(!tracker.is_complete());

    let last = tracker.item_end("/px.jpg").unwrap();
    assert_eq!(last.last(), Some(&LoadEvent::Complete { errors: 0 }));
    assert!(tracker.is_complete());

    // settling again yields nothing
    assert!(tracker.item_end("/px.jpg").unwrap().is_empty());
}

#[test]
fn failed_item_still_counts_toward_completion() {
    let mut tracker = tracker_with(&["/m.glb", "/px.jpg"]);
    tracker.item_end("/m.glb").unwrap();
    let events = tracker.item_error("/px.jpg", "HTTP 404").unwrap();
    assert_eq!(
        events.as_slice(),
        &[
            LoadEvent::Error {
                url: "/px.jpg".into(),
                reason: "HTTP 404".into()
            },
            LoadEvent::Progress {
                url: "/px.jpg".into(),
                loaded: 2,
                total: 2
            },
            LoadEvent::Complete { errors: 1 },
        ]
    );
}

#[test]
fn unknown_url_is_rejected() {
    let mut tracker = tracker_with(&["/m.glb"]);
    assert_eq!(
        tracker.item_end("/other.glb"),
        Err(ViewerError::UnknownAsset {
            url: "/other.glb".into()
        })
    );
    assert_eq!(tracker.loaded(), 0);
}

#[test]
fn progress_with_nothing_registered_is_zero() {
    let mut timeline = OverlayTimeline::new();
    timeline.set_progress(0, 0);
    assert_eq!(timeline.bar_scale(), 0.0);
}

#[test]
fn overlay_stays_opaque_until_complete() {
    let timeline = OverlayTimeline::new();
    assert_eq!(timeline.overlay_alpha(100.0), 1.0);
    assert!(!timeline.ready(100.0));
    assert!(!timeline.bar_ended(100.0));
}

#[test]
fn timeline_follows_completion_delays() {
    let mut timeline = OverlayTimeline::new();
    timeline.complete(10.0);
    timeline.complete(50.0);
    assert_eq!(timeline.completed_at(), Some(10.0));

    assert!(!timeline.bar_ended(10.0 + OVERLAY_START_DELAY_SEC - 0.01));
    assert!(timeline.bar_ended(10.0 + OVERLAY_START_DELAY_SEC));

    let fade_start = 10.0 + OverlayTimeline::fade_start_offset();
    assert_eq!(timeline.overlay_alpha(fade_start), 1.0);
    assert!(approx(
        timeline.overlay_alpha(fade_start + OVERLAY_FADE_DURATION_SEC * 0.5),
        0.25
    ));
    assert_eq!(
        timeline.overlay_alpha(fade_start + OVERLAY_FADE_DURATION_SEC),
        0.0
    );
    assert_eq!(timeline.overlay_alpha(fade_start + 60.0), 0.0);

    assert!(!timeline.ready(10.0 + SCENE_READY_DELAY_SEC - 0.01));
    assert!(timeline.ready(10.0 + SCENE_READY_DELAY_SEC));
}

#[test]
fn scene_becomes_ready_while_overlay_is_fading() {
    let mut timeline = OverlayTimeline::new();
    timeline.complete(0.0);
    let alpha = timeline.overlay_alpha(SCENE_READY_DELAY_SEC);
    assert!(alpha < 1.0 && alpha > 0.0);
}

#[test]
fn failures_accumulate() {
    let mut timeline = OverlayTimeline::new();
    assert_eq!(timeline.failure(), None);
    timeline.fail("a: HTTP 404");
    timeline.fail("b: decode");
    assert_eq!(timeline.failure(), Some("a: HTTP 404; b: decode"));
}

#[test]
fn ease_is_monotone_and_clamped() {
    assert_eq!(ease_out_quad(-1.0), 0.0);
    assert_eq!(ease_out_quad(2.0), 1.0);
    let mut prev = 0.0;
    for i in 1..=10 {
        let v = ease_out_quad(i as f64 / 10.0);
        assert!(v > prev);
        prev = v;
    }
}

#[test]
fn displayed_scale_follows_progress_events_in_order() {
    let mut timeline = OverlayTimeline::new();
    let shown: Vec<f32> = [(1, 10), (5, 10), (10, 10)]
        .into_iter()
        .map(|(loaded, total)| {
            timeline.set_progress(loaded, total);
            timeline.bar_scale()
        })
        .collect();
    assert!(approx(shown[0], 0.1));
    assert!(approx(shown[1], 0.5));
    assert!(approx(shown[2], 1.0));
}
