//! Feedback animator and scripted sequencer timing.

mod common;

use std::time::Duration;

use common::channel_sink;
use githubba_core::feedback::{FeedbackAnimator, FEEDBACK_DURATION};
use githubba_core::sequencer::{ScriptedSequencer, Step};
use githubba_core::timer::{TimerFired, TimerKind};
use githubba_core::types::FeedbackKind;

#[tokio::test(start_paused = true)]
async fn retrigger_replaces_pending_completion() {
    let (sink, mut rx) = channel_sink();
    let mut animator = FeedbackAnimator::new(FEEDBACK_DURATION);

    animator.trigger(FeedbackKind::Like, &sink);
    tokio::time::sleep(Duration::from_millis(300)).await;
    animator.trigger(FeedbackKind::Dislike, &sink);
    assert_eq!(animator.state().kind, Some(FeedbackKind::Dislike));

    let fired = rx.recv().await.unwrap();
    assert_eq!(animator.on_timer(fired), Some(FeedbackKind::Dislike));
    assert!(!animator.state().visible);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(rx.try_recv().is_err(), "the replaced trigger never completes");
}

#[tokio::test(start_paused = true)]
async fn foreign_or_repeated_messages_do_not_complete() {
    let (sink, mut rx) = channel_sink();
    let mut animator = FeedbackAnimator::new(FEEDBACK_DURATION);

    animator.trigger(FeedbackKind::Like, &sink);
    let bogus = TimerFired { kind: TimerKind::Feedback, token: u64::MAX };
    assert_eq!(animator.on_timer(bogus), None);
    assert!(animator.state().visible);

    let fired = rx.recv().await.unwrap();
    assert_eq!(animator.on_timer(fired), Some(FeedbackKind::Like));
    assert_eq!(animator.on_timer(fired), None, "completes once");
}

#[tokio::test(start_paused = true)]
async fn cancel_hides_without_completing() {
    let (sink, mut rx) = channel_sink();
    let mut animator = FeedbackAnimator::new(FEEDBACK_DURATION);

    animator.trigger(FeedbackKind::Like, &sink);
    animator.cancel();
    assert!(!animator.state().visible);

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(rx.try_recv().is_err());
}

static BLINK: &[Step<bool>] = &[
    Step { state: true, duration: Duration::from_millis(100) },
    Step { state: false, duration: Duration::from_millis(300) },
];

#[tokio::test(start_paused = true)]
async fn sequencer_loops_and_stops() {
    let (sink, mut rx) = channel_sink();
    let mut sequencer = ScriptedSequencer::new(BLINK, TimerKind::Hint);

    sequencer.start(&sink);
    assert!(sequencer.current());

    let seen: Vec<bool> = {
        let mut seen = Vec::new();
        for _ in 0..3 {
            let fired = rx.recv().await.unwrap();
            assert!(sequencer.on_timer(fired, &sink));
            seen.push(sequencer.current());
        }
        seen
    };
    assert_eq!(seen, vec![false, true, false]);

    sequencer.stop();
    assert!(!sequencer.is_running());
    tokio::time::sleep(Duration::from_secs(2)).await;
    assert!(rx.try_recv().is_err());
}
