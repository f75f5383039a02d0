//! Asset progress tracking and the loading-overlay timeline.
//!
//! `LoadTracker` counts registered items the way a loading manager does:
//! progress after every settled item, a single completion once everything
//! registered has settled (successfully or not).
//!
//! `OverlayTimeline` turns progress and completion into what the page shows:
//! the progress bar scale, the overlay fade and the scene readiness flag.

use crate::constants::{
    OVERLAY_FADE_DELAY_SEC, OVERLAY_FADE_DURATION_SEC, OVERLAY_START_DELAY_SEC,
    SCENE_READY_DELAY_SEC,
};
use crate::error::{Result, ViewerError};
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub enum LoadEvent {
    Progress {
        url: String,
        loaded: usize,
        total: usize,
    },
    Error {
        url: String,
        reason: String,
    },
    Complete {
        errors: usize,
    },
}

pub type LoadEvents = SmallVec<[LoadEvent; 3]>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ItemStatus {
    Pending,
    Done,
    Failed,
}

#[derive(Clone, Debug, Default)]
pub struct LoadTracker {
    items: Vec<(String, ItemStatus)>,
    loaded: usize,
    errors: usize,
    completed: bool,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item. Registering the same URL twice counts it twice.
    pub fn item_start(&mut self, url: impl Into<String>) {
        self.items.push((url.into(), ItemStatus::Pending));
    }

    pub fn loaded(&self) -> usize {
        self.loaded
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn item_end(&mut self, url: &str) -> Result<LoadEvents> {
        self.settle(url, ItemStatus::Done, None)
    }

    pub fn item_error(&mut self, url: &str, reason: impl Into<String>) -> Result<LoadEvents> {
        self.settle(url, ItemStatus::Failed, Some(reason.into()))
    }

    fn settle(
        &mut self,
        url: &str,
        status: ItemStatus,
        reason: Option<String>,
    ) -> Result<LoadEvents> {
        let mut events = LoadEvents::new();
        if !self.items.iter().any(|(u, _)| u == url) {
            return Err(ViewerError::UnknownAsset {
                url: url.to_string(),
            });
        }
        let Some(slot) = self
            .items
            .iter_mut()
            .find(|(u, s)| u == url && *s == ItemStatus::Pending)
        else {
            // already settled
            return Ok(events);
        };
        slot.1 = status;
        self.loaded += 1;

        if let Some(reason) = reason {
            self.errors += 1;
            events.push(LoadEvent::Error {
                url: url.to_string(),
                reason,
            });
        }
        events.push(LoadEvent::Progress {
            url: url.to_string(),
            loaded: self.loaded,
            total: self.items.len(),
        });
        if self.loaded == self.items.len() && !self.completed {
            self.completed = true;
            events.push(LoadEvent::Complete {
                errors: self.errors,
            });
        }
        Ok(events)
    }
}

/// Power1 ease-out: fast start, gentle landing.
#[inline]
pub fn ease_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

#[derive(Clone, Debug, Default)]
pub struct OverlayTimeline {
    bar_scale: f32,
    completed_at: Option<f64>,
    failure: Option<String>,
}

impl OverlayTimeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later calls overwrite earlier ones, even if they arrive out of order.
    pub fn set_progress(&mut self, loaded: usize, total: usize) {
        self.bar_scale = if total == 0 {
            0.0
        } else {
            (loaded as f32 / total as f32).clamp(0.0, 1.0)
        };
    }

    pub fn bar_scale(&self) -> f32 {
        self.bar_scale
    }

    /// Record completion at `now` seconds. Only the first call counts.
    pub fn complete(&mut self, now: f64) {
        if self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    pub fn completed_at(&self) -> Option<f64> {
        self.completed_at
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.failure = Some(match self.failure.take() {
            Some(prev) => format!("{prev}; {message}"),
            None => message,
        });
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    fn since_complete(&self, now: f64) -> Option<f64> {
        self.completed_at.map(|t0| now - t0)
    }

    /// The bar drops its progress transform and gains the `ended` state.
    pub fn bar_ended(&self, now: f64) -> bool {
        self.since_complete(now)
            .is_some_and(|dt| dt >= OVERLAY_START_DELAY_SEC)
    }

    /// Time at which the overlay starts to fade, relative to completion.
    pub fn fade_start_offset() -> f64 {
        OVERLAY_START_DELAY_SEC + OVERLAY_FADE_DELAY_SEC
    }

    /// Overlay opacity: 1 until the fade starts, then eased down to 0.
    pub fn overlay_alpha(&self, now: f64) -> f32 {
        let Some(dt) = self.since_complete(now) else {
            return 1.0;
        };
        let t = (dt - Self::fade_start_offset()) / OVERLAY_FADE_DURATION_SEC;
        if t <= 0.0 {
            1.0
        } else {
            (1.0 - ease_out_quad(t)) as f32
        }
    }

    pub fn ready(&self, now: f64) -> bool {
        self.since_complete(now)
            .is_some_and(|dt| dt >= SCENE_READY_DELAY_SEC)
    }
}
