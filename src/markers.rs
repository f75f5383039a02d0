use crate::constants::{
    card_id, close_button_id, marker_id, marker_selector, MARKER_VISIBLE_CLASS,
};
use crate::dom;
use viewer_core::{CardController, MarkerState};
use web_sys as web;

/// DOM elements belonging to one hotspot.
#[derive(Clone)]
pub struct HotspotElements {
    /// Positioned marker carrying the `visible` class.
    pub marker: web::HtmlElement,
    /// Click target opening the card (`#point{i}`).
    pub trigger: web::HtmlElement,
    pub card: web::HtmlElement,
    pub close: web::HtmlElement,
}

impl HotspotElements {
    pub fn lookup(document: &web::Document, index: usize) -> anyhow::Result<Self> {
        let marker = dom::query(document, &marker_selector(index))?;
        let trigger = dom::by_id(document, &marker_id(index))?;
        Ok(Self {
            marker,
            trigger,
            card: dom::by_id(document, &card_id(index))?,
            close: dom::by_id(document, &close_button_id(index))?,
        })
    }
}

pub fn lookup_all(document: &web::Document, count: usize) -> anyhow::Result<Vec<HotspotElements>> {
    (0..count)
        .map(|i| HotspotElements::lookup(document, i))
        .collect()
}

/// Position every evaluated marker and toggle its visibility class.
pub fn apply_markers(elements: &[HotspotElements], states: &[MarkerState]) {
    for state in states {
        let Some(el) = elements.get(state.index) else {
            continue;
        };
        dom::set_class(&el.marker, MARKER_VISIBLE_CLASS, state.shown);
        if state.offset_px.is_finite() {
            dom::set_translate(&el.marker, state.offset_px);
        }
    }
}

/// Hide every marker, used until the scene is ready.
pub fn hide_markers(elements: &[HotspotElements]) {
    for el in elements {
        dom::set_class(&el.marker, MARKER_VISIBLE_CLASS, false);
    }
}

pub fn apply_cards(elements: &[HotspotElements], cards: &CardController) {
    for (i, el) in elements.iter().enumerate() {
        dom::set_visibility(&el.card, cards.card_visible(i));
    }
}
