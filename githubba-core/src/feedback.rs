//! Short-lived like/dislike confirmation shown after an accepted swipe.

use std::time::Duration;

use crate::timer::{TimerFired, TimerKind, TimerSink, TimerSlot};
use crate::types::FeedbackKind;

/// How long the confirmation stays on screen before the stack advances.
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(600);

/// Snapshot of the confirmation for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FeedbackAnimationState {
    pub kind: Option<FeedbackKind>,
    pub visible: bool,
}

#[derive(Debug)]
pub struct FeedbackAnimator {
    duration: Duration,
    kind: Option<FeedbackKind>,
    slot: TimerSlot,
}

impl FeedbackAnimator {
    pub fn new(duration: Duration) -> Self {
        Self { duration, kind: None, slot: TimerSlot::new(TimerKind::Feedback) }
    }

    pub fn state(&self) -> FeedbackAnimationState {
        FeedbackAnimationState { kind: self.kind, visible: self.kind.is_some() }
    }

    pub fn is_visible(&self) -> bool {
        self.kind.is_some()
    }

    /// Shows `kind` immediately and schedules its completion.
    ///
    /// A pending completion from an earlier trigger is cancelled: only the most
    /// recent trigger ever completes.
    pub fn trigger(&mut self, kind: FeedbackKind, sink: &TimerSink) {
        self.kind = Some(kind);
        self.slot.schedule(self.duration, sink);
    }

    /// Hides the confirmation when `fired` is its live timer.
    ///
    /// Returns the kind that completed; the caller runs the completion step.
    pub fn on_timer(&mut self, fired: TimerFired) -> Option<FeedbackKind> {
        if !self.slot.complete(fired) {
            return None;
        }
        self.kind.take()
    }

    /// Drops the confirmation without completing it.
    pub fn cancel(&mut self) {
        self.slot.cancel();
        self.kind = None;
    }
}
