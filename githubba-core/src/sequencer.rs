//! Looping timer script driven by a static `(state, duration)` table.

use std::time::Duration;

use crate::timer::{TimerFired, TimerKind, TimerSink, TimerSlot};

/// One entry of a script: the state to expose and how long to hold it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<T> {
    pub state: T,
    pub duration: Duration,
}

/// Walks a fixed script in a loop, one timer at a time.
///
/// The sequencer owns a single [`TimerSlot`], so stopping it (or dropping it)
/// leaves no timer behind.
#[derive(Debug)]
pub struct ScriptedSequencer<T: 'static> {
    script: &'static [Step<T>],
    index: usize,
    running: bool,
    slot: TimerSlot,
}

impl<T: Copy + 'static> ScriptedSequencer<T> {
    /// Creates a stopped sequencer. `script` must not be empty.
    pub fn new(script: &'static [Step<T>], kind: TimerKind) -> Self {
        assert!(!script.is_empty(), "a scripted sequence needs at least one step");
        Self { script, index: 0, running: false, slot: TimerSlot::new(kind) }
    }

    /// Starts from the first step. Restarting a running sequencer rewinds it.
    pub fn start(&mut self, sink: &TimerSink) {
        self.index = 0;
        self.running = true;
        self.slot.schedule(self.script[0].duration, sink);
    }

    /// Stops the script and cancels its timer.
    pub fn stop(&mut self) {
        self.running = false;
        self.slot.cancel();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Index of the step currently held.
    pub fn step_index(&self) -> usize {
        self.index
    }

    /// State of the step currently held.
    pub fn current(&self) -> T {
        self.script[self.index].state
    }

    /// Moves to the next step when `fired` belongs to the live timer.
    ///
    /// Returns `true` if the sequencer advanced.
    pub fn on_timer(&mut self, fired: TimerFired, sink: &TimerSink) -> bool {
        if !self.running || !self.slot.complete(fired) {
            return false;
        }
        self.index = (self.index + 1) % self.script.len();
        self.slot.schedule(self.script[self.index].duration, sink);
        true
    }
}
