//! Card-stack progression engine.
//!
//! [`CardStack`] owns the swipe-session cursor and composes the hint animator,
//! the feedback animator and the pagination coordinator. It never owns the
//! repository list: every operation takes the current [`RepositoryFeed`]
//! snapshot and derives the visible window and pagination decisions from it.
//!
//! # Card lifecycle
//!
//! `pending` (top card, awaiting a swipe) -> `animating-feedback` (swipe
//! accepted, confirmation visible) -> `advancing` (cursor incremented when the
//! confirmation timer fires) -> the next card becomes `pending`. Cards below
//! the top never receive input; they only move up as the cursor catches up.
//!
//! # Timers
//!
//! Animation timers report back through the [`TimerSink`] given at
//! construction. The owner must route every [`TimerFired`] it receives into
//! [`CardStack::handle_timer`]. After [`CardStack::dispose`] (or drop) no timer
//! fires and late messages are ignored.

use std::time::Duration;

use crate::feed::{LinkOpener, RepositoryFeed};
use crate::feedback::{FeedbackAnimationState, FeedbackAnimator, FEEDBACK_DURATION};
use crate::hint::{HintAnimator, SwipeHintState};
use crate::pagination::{LatchPolicy, PaginationCoordinator, PaginationDecision, LOOKAHEAD_THRESHOLD};
use crate::timer::{TimerFired, TimerKind, TimerSink};
use crate::types::{CardRecord, FeedbackKind, SwipeDirection};

/// Number of cards rendered as a physical stack.
pub const WINDOW_SIZE: usize = 3;

/// What happens when the last known card is swiped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndOfList {
    /// Advance past the last card into the exhausted state. The next record
    /// to arrive becomes the top card.
    #[default]
    Exhaust,
    /// Keep the last card on top; the swipe animates but does not advance.
    /// This is the literal end-of-list guard: `advance` returns early while
    /// the cursor sits on the last index. Selected with `end_of_list = "hold"`.
    HoldLastCard,
}

#[derive(Debug, Clone)]
pub struct StackConfig {
    pub window_size: usize,
    pub lookahead: usize,
    pub latch: LatchPolicy,
    pub feedback_duration: Duration,
    pub end_of_list: EndOfList,
    pub show_hint: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            lookahead: LOOKAHEAD_THRESHOLD,
            latch: LatchPolicy::default(),
            feedback_duration: FEEDBACK_DURATION,
            end_of_list: EndOfList::default(),
            show_hint: true,
        }
    }
}

/// Result of reporting a completed swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// The swipe named a card that is not on top. Nothing changed.
    Stale,
    /// Another swipe's confirmation is still showing; this one was dropped.
    Dropped,
    /// The swipe was accepted and its confirmation is showing.
    Accepted(FeedbackKind),
}

/// Whether there is a card to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackStatus {
    Active,
    /// Every known record has been acted on. Not an error: the caller shows a
    /// completion message until more records arrive.
    Exhausted,
}

/// One entry of the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackCard<'a, R> {
    /// 0 for the top card, increasing towards the back.
    pub stack_index: usize,
    /// Position of the record in the full sequence.
    pub record_index: usize,
    pub record: &'a R,
    /// Only the top card receives gestures.
    pub accepts_input: bool,
}

/// Returns up to `size` records starting at `current_index`, in order.
pub fn visible_window<R>(records: &[R], current_index: usize, size: usize) -> Vec<StackCard<'_, R>> {
    let start = current_index.min(records.len());
    let end = start.saturating_add(size).min(records.len());
    records[start..end]
        .iter()
        .enumerate()
        .map(|(stack_index, record)| StackCard {
            stack_index,
            record_index: start + stack_index,
            record,
            accepts_input: stack_index == 0,
        })
        .collect()
}

pub struct CardStack {
    current_index: usize,
    window_size: usize,
    end_of_list: EndOfList,
    hint: HintAnimator,
    feedback: FeedbackAnimator,
    pagination: PaginationCoordinator,
    opener: Box<dyn LinkOpener + Send>,
    sink: TimerSink,
    disposed: bool,
}

impl CardStack {
    /// Creates a session at the first record and starts the swipe hint.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: StackConfig, opener: Box<dyn LinkOpener + Send>, sink: TimerSink) -> Self {
        let hint = if config.show_hint { HintAnimator::start(&sink) } else { HintAnimator::inactive() };
        Self {
            current_index: 0,
            window_size: config.window_size.max(1),
            end_of_list: config.end_of_list,
            hint,
            feedback: FeedbackAnimator::new(config.feedback_duration),
            pagination: PaginationCoordinator::new(config.lookahead, config.latch),
            opener,
            sink,
            disposed: false,
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn hint(&self) -> SwipeHintState {
        self.hint.state()
    }

    pub fn feedback(&self) -> FeedbackAnimationState {
        self.feedback.state()
    }

    pub fn has_pending_request(&self) -> bool {
        self.pagination.has_pending_request()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn status(&self, len: usize) -> StackStatus {
        if self.current_index >= len {
            StackStatus::Exhausted
        } else {
            StackStatus::Active
        }
    }

    pub fn is_exhausted(&self, len: usize) -> bool {
        self.status(len) == StackStatus::Exhausted
    }

    /// Cards to render, top first. Draw them in reverse so the top card lands last.
    pub fn visible_window<'a, R>(&self, records: &'a [R]) -> Vec<StackCard<'a, R>> {
        visible_window(records, self.current_index, self.window_size)
    }

    /// Re-evaluates pagination against the latest feed snapshot.
    ///
    /// Call after every change to the feed (new records, fetch started or
    /// finished). The stack calls it itself after advancing.
    pub fn sync<F: RepositoryFeed>(&mut self, feed: &mut F) {
        if self.disposed {
            return;
        }
        let len = feed.records().len();
        let decision = self.pagination.observe(len, self.current_index, feed.is_fetching_more());
        if decision == PaginationDecision::RequestMore {
            feed.request_more();
        }
    }

    /// Tells the coordinator that the outstanding page request finished.
    ///
    /// Releases the latch under [`LatchPolicy::Acknowledged`]; a no-op under
    /// the growth-threshold policy.
    pub fn acknowledge_page<F: RepositoryFeed>(&mut self, feed: &mut F) {
        self.pagination.acknowledge();
        self.sync(feed);
    }

    /// Entry point for a completed swipe on the card at `record_index`.
    pub fn on_swipe_completed<F: RepositoryFeed>(
        &mut self,
        direction: SwipeDirection,
        record_index: usize,
        feed: &F,
    ) -> SwipeOutcome {
        if self.disposed || record_index != self.current_index {
            tracing::trace!(record_index, current = self.current_index, "stale swipe ignored");
            return SwipeOutcome::Stale;
        }
        let Some(record) = feed.records().get(record_index) else {
            return SwipeOutcome::Stale;
        };

        self.hint.deactivate();

        if self.feedback.is_visible() {
            tracing::debug!(record_index, "swipe dropped, previous confirmation still showing");
            return SwipeOutcome::Dropped;
        }

        let kind = FeedbackKind::from(direction);
        tracing::info!(id = record.card_id(), ?direction, "swipe accepted");
        if direction == SwipeDirection::Right {
            self.opener.open_external(record.external_url());
        }
        self.feedback.trigger(kind, &self.sink);
        SwipeOutcome::Accepted(kind)
    }

    /// Applies an elapsed timer. Messages for replaced timers, or arriving
    /// after disposal, are ignored.
    pub fn handle_timer<F: RepositoryFeed>(&mut self, fired: TimerFired, feed: &mut F) {
        if self.disposed {
            return;
        }
        match fired.kind {
            TimerKind::Hint => {
                self.hint.on_timer(fired, &self.sink);
            }
            TimerKind::Feedback => {
                if self.feedback.on_timer(fired).is_some() {
                    self.advance(feed.records().len());
                    self.sync(feed);
                }
            }
        }
    }

    fn advance(&mut self, len: usize) {
        let can_advance = match self.end_of_list {
            EndOfList::Exhaust => self.current_index < len,
            EndOfList::HoldLastCard => self.current_index + 1 < len,
        };
        if can_advance {
            self.current_index += 1;
            tracing::debug!(current = self.current_index, len, "advanced to next card");
        }
    }

    /// Cancels every pending timer. Nothing changes state afterwards.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.hint.deactivate();
        self.feedback.cancel();
    }
}

impl Drop for CardStack {
    fn drop(&mut self) {
        self.dispose();
    }
}
