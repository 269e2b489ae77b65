//! Score popups - a short-lived "+points" marker per cleared pass
//!
//! Presentation state only. Popups live in a bounded FIFO; the oldest is
//! dropped when full, and each expires after [`POPUP_TTL_MS`] of tick time.

use arrayvec::ArrayVec;

use crate::types::{MAX_POPUPS, POPUP_TTL_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScorePopup {
    /// Monotonic id, unique within one [`PopupQueue`]
    pub id: u32,
    pub points: u32,
    /// Cell the popup is drawn over
    pub anchor: usize,
    pub remaining_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct PopupQueue {
    popups: ArrayVec<ScorePopup, MAX_POPUPS>,
    next_id: u32,
}

impl PopupQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, points: u32, anchor: usize) -> u32 {
        if self.popups.is_full() {
            self.popups.remove(0);
        }
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        self.popups.push(ScorePopup {
            id,
            points,
            anchor,
            remaining_ms: POPUP_TTL_MS,
        });
        id
    }

    /// Age every popup and drop the expired ones
    pub fn tick(&mut self, elapsed_ms: u32) {
        for popup in self.popups.iter_mut() {
            popup.remaining_ms = popup.remaining_ms.saturating_sub(elapsed_ms);
        }
        self.popups.retain(|p| p.remaining_ms > 0);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScorePopup> {
        self.popups.iter()
    }

    pub fn len(&self) -> usize {
        self.popups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.popups.is_empty()
    }

    pub fn clear(&mut self) {
        self.popups.clear();
    }
}
