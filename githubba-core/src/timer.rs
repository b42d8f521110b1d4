//! Owned timeout handles for the card-stack animations.
//!
//! Every animation that needs a delay owns exactly one [`TimerSlot`]. Scheduling
//! on a slot aborts whatever the slot was waiting for, so a slot never has more
//! than one live timer. When a timer elapses it does not touch any state
//! itself: it hands a [`TimerFired`] message to the [`TimerSink`], and the UI
//! task routes that message back into [`crate::stack::CardStack::handle_timer`].
//!
//! Tokens are unique for the whole process. A message whose token no longer
//! matches its slot (the timer was replaced, cancelled, or belongs to a stack
//! that has since been disposed) is ignored by the receiving component.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

fn next_token() -> u64 {
    NEXT_TOKEN.fetch_add(1, Ordering::Relaxed)
}

/// Which animation a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// The like/dislike confirmation finished.
    Feedback,
    /// The swipe hint script reached the end of its current step.
    Hint,
}

/// Message delivered through the [`TimerSink`] when a timer elapses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub kind: TimerKind,
    pub token: u64,
}

/// Destination for elapsed timers.
///
/// The binary forwards these into its event channel; tests forward them into
/// a plain `mpsc` channel.
pub type TimerSink = Arc<dyn Fn(TimerFired) + Send + Sync>;

/// A single owned timeout handle.
///
/// Must be used from within a tokio runtime: [`TimerSlot::schedule`] spawns the
/// sleeping task.
pub struct TimerSlot {
    kind: TimerKind,
    pending: Option<(u64, JoinHandle<()>)>,
}

impl TimerSlot {
    pub fn new(kind: TimerKind) -> Self {
        Self { kind, pending: None }
    }

    /// Starts a timer that fires after `delay`, cancelling any previous one.
    ///
    /// Returns the token carried by the eventual [`TimerFired`].
    pub fn schedule(&mut self, delay: Duration, sink: &TimerSink) -> u64 {
        self.cancel();
        let token = next_token();
        let fired = TimerFired { kind: self.kind, token };
        let sink = Arc::clone(sink);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            sink(fired);
        });
        self.pending = Some((token, handle));
        token
    }

    /// Aborts the pending timer, if any.
    pub fn cancel(&mut self) {
        if let Some((_, handle)) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consumes the pending timer if `fired` belongs to it.
    ///
    /// Returns `false` for messages from replaced or cancelled timers; the
    /// caller must then leave its state untouched.
    pub fn complete(&mut self, fired: TimerFired) -> bool {
        match self.pending {
            Some((token, _)) if fired.kind == self.kind && fired.token == token => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for TimerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerSlot")
            .field("kind", &self.kind)
            .field("token", &self.pending.as_ref().map(|(token, _)| *token))
            .finish()
    }
}
