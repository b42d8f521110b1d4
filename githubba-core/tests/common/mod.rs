//! Shared fixtures for the card-stack integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use githubba_core::feed::{LinkOpener, RepositoryFeed};
use githubba_core::stack::CardStack;
use githubba_core::timer::{TimerFired, TimerKind, TimerSink};
use githubba_core::types::CardRecord;
use tokio::sync::mpsc;

/// Minimal record: an id and a URL derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: u64,
    pub url: String,
}

impl Card {
    pub fn new(id: u64) -> Self {
        Self { id, url: format!("https://github.com/example/repo-{id}") }
    }
}

impl CardRecord for Card {
    fn card_id(&self) -> u64 {
        self.id
    }

    fn external_url(&self) -> &str {
        &self.url
    }
}

/// In-memory feed that counts `request_more` calls instead of fetching.
#[derive(Debug, Default)]
pub struct VecFeed {
    pub records: Vec<Card>,
    pub fetching: bool,
    pub requests: usize,
}

impl VecFeed {
    pub fn with_len(len: usize) -> Self {
        Self { records: (0..len as u64).map(Card::new).collect(), fetching: false, requests: 0 }
    }

    pub fn append(&mut self, count: usize) {
        let start = self.records.len() as u64;
        self.records.extend((start..start + count as u64).map(Card::new));
    }
}

impl RepositoryFeed for VecFeed {
    type Record = Card;

    fn records(&self) -> &[Card] {
        &self.records
    }

    fn is_fetching_more(&self) -> bool {
        self.fetching
    }

    fn request_more(&mut self) {
        self.requests += 1;
    }
}

/// Opener that remembers every URL it was asked to open.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl RecordingOpener {
    pub fn urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open_external(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_owned());
    }
}

/// Opener that fails the way a missing browser would: loudly, to itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrokenOpener;

impl LinkOpener for BrokenOpener {
    fn open_external(&self, _url: &str) {
        let _ = std::process::Command::new("/nonexistent/browser").spawn();
    }
}

/// Sink forwarding elapsed timers into a channel the test drains.
pub fn channel_sink() -> (TimerSink, mpsc::UnboundedReceiver<TimerFired>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink: TimerSink = Arc::new(move |fired| {
        let _ = tx.send(fired);
    });
    (sink, rx)
}

/// Routes timer messages into the stack until one of `kind` has been applied.
pub async fn pump_until(
    stack: &mut CardStack,
    feed: &mut VecFeed,
    rx: &mut mpsc::UnboundedReceiver<TimerFired>,
    kind: TimerKind,
) -> TimerFired {
    loop {
        let fired = rx.recv().await.expect("timer channel closed");
        stack.handle_timer(fired, feed);
        if fired.kind == kind {
            return fired;
        }
    }
}
