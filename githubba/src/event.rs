//! Event bus for githubba.
//!
//! All user input, animation timers, and search results are normalised into
//! a single `AppEvent` enum and sent over a tokio unbounded MPSC channel. The
//! main loop receives from this channel and dispatches accordingly.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms ≈ 30 FPS): triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms = 4 Hz): advances the loading spinner.
//!
//! Card-stack animation timers do not ride on the tick: each one reports back
//! through the [`TimerSink`] built by [`timer_sink`] as an [`AppEvent::Timer`].

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use githubba_core::timer::{TimerFired, TimerSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// All events the application can receive from any source.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    ///
    /// Release and repeat events are filtered in [`spawn_event_task`] to avoid
    /// double-firing on Windows, which synthesises both press and release for
    /// every keystroke.
    Key(KeyEvent),
    /// A mouse event from the terminal (click, scroll, move).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick for state updates (4 Hz / 250 ms).
    Tick,
    /// Render tick: triggers a `terminal.draw()` call (≈30 FPS / 33 ms).
    Render,
    /// A hint or feedback animation timer elapsed.
    Timer(TimerFired),
    /// A page of search results (or the error) from the feed worker.
    FeedResult(Box<crate::feed::FeedResultPayload>),
    /// The terminal input stream ended; the app should exit.
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
///
/// The sender (`tx`) is cloned and distributed to background tasks;
/// the receiver (`rx`) is owned by the main event loop.
pub struct EventHandler {
    /// Send half: clone this for each background task that produces events.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Receive half: owned by the main loop; call `.recv().await` to block
    /// until the next event.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Creates a new `EventHandler` with a fresh unbounded channel.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraps the event sender as a sink for the card stack's animation timers.
///
/// A send after the receiver is gone is dropped silently; the app is exiting.
pub fn timer_sink(tx: mpsc::UnboundedSender<AppEvent>) -> TimerSink {
    Arc::new(move |fired| {
        let _ = tx.send(AppEvent::Timer(fired));
    })
}

/// Spawns the background tokio task that drives the unified event channel.
///
/// The task runs until the receiver is dropped or the terminal input stream
/// ends, in which case it sends [`AppEvent::Quit`] first. Two fully independent `tokio::time::interval` timers drive the
/// render and logic cycles; crossterm input is polled via `EventStream`.
///
/// # Key implementation choices
///
/// - `reader.next().fuse()`: required so that if the crossterm stream
///   terminates unexpectedly, `tokio::select!` does not keep polling a
///   completed future (which would cause a panic).
/// - `KeyEventKind::Press` filter: Windows fires both `Press` and `Release`
///   for every keystroke. Without the filter, every key press appears twice.
/// - The task stops once a send fails, i.e. the receiver has been dropped.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            let event = tokio::select! {
                _ = tick_tick => Some(AppEvent::Tick),
                _ = render_tick => Some(AppEvent::Render),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        Some(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Resize(w, h))) => Some(AppEvent::Resize(w, h)),
                    Some(Ok(Event::Mouse(mouse))) => Some(AppEvent::Mouse(mouse)),
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal event stream error");
                        None
                    }
                    Some(Ok(_)) => None,
                    None => {
                        let _ = tx.send(AppEvent::Quit);
                        break;
                    }
                },
            };
            if let Some(event) = event {
                if tx.send(event).is_err() {
                    break;
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use githubba_core::timer::TimerKind;

    #[test]
    fn timer_sink_forwards_into_the_event_channel() {
        let handler = EventHandler::new();
        let sink = timer_sink(handler.tx.clone());
        let mut rx = handler.rx;

        sink(TimerFired { kind: TimerKind::Feedback, token: 7 });

        match rx.try_recv() {
            Ok(AppEvent::Timer(fired)) => assert_eq!(fired.token, 7),
            other => panic!("expected a timer event, got {other:?}"),
        }
    }
}
