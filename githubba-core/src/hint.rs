//! Looping "swipe me" hint shown until the first real swipe.

use std::time::Duration;

use crate::sequencer::{ScriptedSequencer, Step};
use crate::timer::{TimerFired, TimerKind, TimerSink};
use crate::types::SwipeDirection;

/// Right, pause, left, longer pause. Loops until deactivated.
pub const HINT_SCRIPT: &[Step<Option<SwipeDirection>>] = &[
    Step { state: Some(SwipeDirection::Right), duration: Duration::from_millis(1500) },
    Step { state: None, duration: Duration::from_millis(500) },
    Step { state: Some(SwipeDirection::Left), duration: Duration::from_millis(1500) },
    Step { state: None, duration: Duration::from_millis(1000) },
];

/// Snapshot of the hint for renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeHintState {
    pub active: bool,
    pub direction: Option<SwipeDirection>,
    pub step_index: usize,
}

#[derive(Debug)]
pub struct HintAnimator {
    sequencer: ScriptedSequencer<Option<SwipeDirection>>,
    active: bool,
}

impl HintAnimator {
    /// Creates the hint and starts its script.
    pub fn start(sink: &TimerSink) -> Self {
        let mut sequencer = ScriptedSequencer::new(HINT_SCRIPT, TimerKind::Hint);
        sequencer.start(sink);
        Self { sequencer, active: true }
    }

    /// A hint that never shows, for sessions configured without one.
    pub fn inactive() -> Self {
        Self { sequencer: ScriptedSequencer::new(HINT_SCRIPT, TimerKind::Hint), active: false }
    }

    pub fn state(&self) -> SwipeHintState {
        if !self.active {
            return SwipeHintState { active: false, direction: None, step_index: 0 };
        }
        SwipeHintState {
            active: true,
            direction: self.sequencer.current(),
            step_index: self.sequencer.step_index(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turns the hint off for the rest of the session. There is no way back.
    pub fn deactivate(&mut self) {
        if self.active {
            tracing::debug!("swipe hint deactivated");
        }
        self.active = false;
        self.sequencer.stop();
    }

    pub fn on_timer(&mut self, fired: TimerFired, sink: &TimerSink) -> bool {
        self.active && self.sequencer.on_timer(fired, sink)
    }
}
