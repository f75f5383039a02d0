// Host-side tests for the page contract constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn element_names_follow_page_contract() {
    assert_eq!(marker_selector(0), ".point-0");
    assert_eq!(marker_id(7), "point7");
    assert_eq!(card_id(3), "card3");
    assert_eq!(close_button_id(5), "close-btn5");
}

#[test]
fn hotspot_count_matches_configured_positions() {
    assert_eq!(HOTSPOT_COUNT, viewer_core::HOTSPOT_POSITIONS.len());
    assert_eq!(HOTSPOT_COUNT, viewer_core::ViewerConfig::default().hotspots.len());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timeline_constants_are_ordered() {
    use viewer_core::*;
    assert!(OVERLAY_START_DELAY_SEC > 0.0);
    assert!(OVERLAY_FADE_DURATION_SEC > 0.0);
    // markers appear while the overlay is already fading
    assert!(SCENE_READY_DELAY_SEC >= OVERLAY_START_DELAY_SEC + OVERLAY_FADE_DELAY_SEC);
    assert!(
        SCENE_READY_DELAY_SEC
            < OVERLAY_START_DELAY_SEC + OVERLAY_FADE_DELAY_SEC + OVERLAY_FADE_DURATION_SEC
    );
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn orbit_limits_are_consistent() {
    use viewer_core::*;
    assert!(ORBIT_MIN_DISTANCE <= ORBIT_MAX_DISTANCE);
    assert!(ORBIT_MIN_AZIMUTH < ORBIT_MAX_AZIMUTH);
    assert!(ORBIT_MIN_POLAR < ORBIT_MAX_POLAR);
    assert!(ORBIT_MAX_POLAR < std::f32::consts::PI);
    assert!(ORBIT_DAMPING_FACTOR > 0.0 && ORBIT_DAMPING_FACTOR <= 1.0);
    assert!(MAX_PIXEL_RATIO >= 1.0);
}

#[test]
fn every_hotspot_element_lookup_is_distinct() {
    // Triggers, cards and close buttons are all required lookups; a clash would
    // let one missing element hide behind another.
    let mut ids: Vec<String> = (0..HOTSPOT_COUNT)
        .flat_map(|i| [marker_id(i), card_id(i), close_button_id(i)])
        .collect();
    let total = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), total);
    assert_eq!(total, 3 * HOTSPOT_COUNT);
    // the trigger id is not the marker's class selector
    assert_ne!(format!(".{}", marker_id(0)), marker_selector(0));
}
