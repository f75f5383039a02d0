//! Loading bar presentation driven by the overlay timeline.
//!
//! The full-screen fade itself is drawn by the composite pass; this module
//! only touches the DOM progress bar.

use crate::constants::{LOADING_BAR_ENDED_CLASS, LOADING_BAR_ERROR_CLASS};
use crate::dom;
use viewer_core::OverlayTimeline;
use web_sys as web;

pub struct LoadingBar {
    el: web::HtmlElement,
    shown_scale: Option<f32>,
    ended: bool,
    failed: bool,
}

impl LoadingBar {
    pub fn new(el: web::HtmlElement) -> Self {
        Self {
            el,
            shown_scale: None,
            ended: false,
            failed: false,
        }
    }

    /// Push the timeline state to the bar, touching the DOM only on change.
    pub fn sync(&mut self, timeline: &OverlayTimeline, now: f64) {
        if let Some(msg) = timeline.failure() {
            if !self.failed {
                self.failed = true;
                dom::set_class(&self.el, LOADING_BAR_ERROR_CLASS, true);
                _ = self.el.set_attribute("title", msg);
            }
        }

        if self.ended {
            return;
        }
        if timeline.bar_ended(now) {
            self.ended = true;
            dom::set_class(&self.el, LOADING_BAR_ENDED_CLASS, true);
            _ = self.el.style().set_property("transform", "");
            return;
        }

        let scale = timeline.bar_scale();
        if self.shown_scale != Some(scale) {
            self.shown_scale = Some(scale);
            _ = self
                .el
                .style()
                .set_property("transform", &format!("scaleX({scale})"));
        }
    }
}
