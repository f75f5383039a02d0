// DOM contract and render-target constants for the web front-end.
//
// Element ids are formatted with the hotspot index (`point0`, `card0`,
// `close-btn0`, ...); marker elements carry the `point-{i}` class.
// Canvas the renderer draws into
pub const CANVAS_SELECTOR: &str = "canvas.webgl";

// Loading bar and its state classes
pub const LOADING_BAR_SELECTOR: &str = ".loading-bar";
pub const LOADING_BAR_ENDED_CLASS: &str = "ended";
pub const LOADING_BAR_ERROR_CLASS: &str = "error";

// Hotspot markers, cards and their close buttons
pub const HOTSPOT_COUNT: usize = 8;
pub const MARKER_CLASS_PREFIX: &str = "point-";
pub const MARKER_ID_PREFIX: &str = "point";
pub const CARD_ID_PREFIX: &str = "card";
pub const CLOSE_BUTTON_ID_PREFIX: &str = "close-btn";
pub const MARKER_VISIBLE_CLASS: &str = "visible";

#[inline]
pub fn marker_selector(index: usize) -> String {
    format!(".{MARKER_CLASS_PREFIX}{index}")
}

#[inline]
pub fn marker_id(index: usize) -> String {
    format!("{MARKER_ID_PREFIX}{index}")
}

#[inline]
pub fn card_id(index: usize) -> String {
    format!("{CARD_ID_PREFIX}{index}")
}

#[inline]
pub fn close_button_id(index: usize) -> String {
    format!("{CLOSE_BUTTON_ID_PREFIX}{index}")
}
