use crate::error::{Result, ViewerError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardState {
    AllMarkersEnabled,
    CardOpen(usize),
}

/// Single-open-card controller shared by every hotspot.
///
/// Opening a card always closes the others first, so at most one card is
/// visible after any sequence of clicks.
#[derive(Clone, Debug)]
pub struct CardController {
    count: usize,
    open: Option<usize>,
}

impl CardController {
    pub fn new(count: usize) -> Self {
        Self { count, open: None }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn state(&self) -> CardState {
        match self.open {
            Some(i) => CardState::CardOpen(i),
            None => CardState::AllMarkersEnabled,
        }
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.count {
            Ok(())
        } else {
            Err(ViewerError::HotspotOutOfRange {
                index,
                count: self.count,
            })
        }
    }

    /// Marker `index` clicked: close everything, then open its card.
    pub fn click_marker(&mut self, index: usize) -> Result<CardState> {
        self.check(index)?;
        self.close_all();
        self.open = Some(index);
        Ok(self.state())
    }

    /// Close button `index` clicked. Only the open card's button is
    /// reachable; a stray click on another button changes nothing.
    pub fn click_close(&mut self, index: usize) -> Result<CardState> {
        self.check(index)?;
        if self.open == Some(index) {
            self.close_all();
        }
        Ok(self.state())
    }

    pub fn close_all(&mut self) {
        self.open = None;
    }

    pub fn card_visible(&self, index: usize) -> bool {
        self.open == Some(index)
    }

    pub fn any_open(&self) -> bool {
        self.open.is_some()
    }

    pub fn markers_enabled(&self) -> bool {
        self.open.is_none()
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.count).filter(|i| self.card_visible(*i))
    }
}
