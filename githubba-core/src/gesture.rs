//! Horizontal swipe recognition for the top card.
//!
//! The detector works in terminal cells. A press starts tracking, drags update
//! the live offset, and the release classifies the whole gesture. Up and down
//! swipes are suppressed, as are drags shorter than the threshold.

use crate::types::SwipeDirection;

/// Minimum horizontal travel, in columns, for a drag to count as a swipe.
pub const DEFAULT_SWIPE_THRESHOLD: u16 = 8;

#[derive(Debug, Clone)]
pub struct SwipeGesture {
    record_index: usize,
    enabled: bool,
    threshold: u16,
    origin: Option<(u16, u16)>,
    last: (u16, u16),
}

impl SwipeGesture {
    /// Detector wrapping the card at `record_index`. Cards that do not accept
    /// input (anything below the top of the stack) get a disabled detector.
    pub fn new(record_index: usize, enabled: bool, threshold: u16) -> Self {
        Self { record_index, enabled, threshold: threshold.max(1), origin: None, last: (0, 0) }
    }

    /// Record index the detector was created for; reported with the swipe.
    pub fn record_index(&self) -> usize {
        self.record_index
    }

    pub fn is_tracking(&self) -> bool {
        self.origin.is_some()
    }

    pub fn press(&mut self, column: u16, row: u16) {
        if !self.enabled {
            return;
        }
        self.origin = Some((column, row));
        self.last = (column, row);
    }

    pub fn drag(&mut self, column: u16, row: u16) {
        if self.origin.is_some() {
            self.last = (column, row);
        }
    }

    /// Live horizontal displacement of the card, negative to the left.
    pub fn offset(&self) -> i32 {
        match self.origin {
            Some((x, _)) => i32::from(self.last.0) - i32::from(x),
            None => 0,
        }
    }

    /// Ends the gesture and classifies it.
    pub fn release(&mut self, column: u16, row: u16) -> Option<SwipeDirection> {
        let (x0, y0) = self.origin.take()?;
        let dx = i32::from(column) - i32::from(x0);
        let dy = i32::from(row) - i32::from(y0);
        classify(dx, dy, self.threshold)
    }

    /// Abandons the gesture without a swipe.
    pub fn cancel(&mut self) {
        self.origin = None;
    }
}

/// Terminal cells are roughly twice as tall as they are wide, so vertical
/// travel is weighted double before comparing it with horizontal travel.
pub fn classify(dx: i32, dy: i32, threshold: u16) -> Option<SwipeDirection> {
    if dx.unsigned_abs() < u32::from(threshold) || dx.abs() <= dy.abs() * 2 {
        return None;
    }
    if dx < 0 {
        Some(SwipeDirection::Left)
    } else {
        Some(SwipeDirection::Right)
    }
}
