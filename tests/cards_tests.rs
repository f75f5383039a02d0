// Host-side tests for the card interaction controller.

use viewer_core::{CardController, CardState, ViewerError};

#[test]
fn starts_with_all_markers_enabled() {
    let cards = CardController::new(8);
    assert_eq!(cards.state(), CardState::AllMarkersEnabled);
    assert!(cards.markers_enabled());
    assert_eq!(cards.visible_cards().count(), 0);
}

#[test]
fn marker_click_opens_its_card() {
    let mut cards = CardController::new(8);
    assert_eq!(cards.click_marker(2), Ok(CardState::CardOpen(2)));
    assert!(cards.card_visible(2));
    assert!(!cards.markers_enabled());
}

#[test]
fn second_marker_click_replaces_the_open_card() {
    let mut cards = CardController::new(8);
    cards.click_marker(0).unwrap();
    cards.click_marker(5).unwrap();
    assert_eq!(cards.visible_cards().collect::<Vec<_>>(), vec![5]);
}

#[test]
fn close_button_of_open_card_restores_markers() {
    let mut cards = CardController::new(8);
    cards.click_marker(3).unwrap();
    assert_eq!(cards.click_close(3), Ok(CardState::AllMarkersEnabled));
    assert!(cards.markers_enabled());
    assert!(!cards.any_open());
}

#[test]
fn close_button_of_another_card_changes_nothing() {
    let mut cards = CardController::new(8);
    cards.click_marker(1).unwrap();
    assert_eq!(cards.click_close(4), Ok(CardState::CardOpen(1)));
    assert!(cards.card_visible(1));
}

#[test]
fn close_without_open_card_is_harmless() {
    let mut cards = CardController::new(8);
    assert_eq!(cards.click_close(0), Ok(CardState::AllMarkersEnabled));
}

#[test]
fn at_most_one_card_open_after_any_click_sequence() {
    let mut cards = CardController::new(8);
    let clicks: [(bool, usize); 10] = [
        (true, 0),
        (true, 7),
        (false, 0),
        (true, 3),
        (true, 3),
        (false, 3),
        (false, 3),
        (true, 6),
        (true, 1),
        (false, 6),
    ];
    for (is_marker, i) in clicks {
        if is_marker {
            cards.click_marker(i).unwrap();
        } else {
            cards.click_close(i).unwrap();
        }
        assert!(cards.visible_cards().count() <= 1);
        assert_eq!(cards.markers_enabled(), !cards.any_open());
    }
    assert_eq!(cards.state(), CardState::CardOpen(1));
}

#[test]
fn out_of_range_clicks_are_rejected_without_state_change() {
    let mut cards = CardController::new(8);
    cards.click_marker(2).unwrap();
    assert_eq!(
        cards.click_marker(8),
        Err(ViewerError::HotspotOutOfRange { index: 8, count: 8 })
    );
    assert!(cards.click_close(9).is_err());
    assert_eq!(cards.state(), CardState::CardOpen(2));
}
