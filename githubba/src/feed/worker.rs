//! Background task that owns the GitHub client.
//!
//! Requests arrive over an unbounded channel and are served one at a time, in
//! order. Every outcome, success or error, goes back to the main loop as an
//! [`AppEvent::FeedResult`]. The task ends when either channel closes.

use githubba_core::github::GithubClient;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::event::AppEvent;
use crate::feed::{FeedRequest, FeedResultPayload};

/// Spawns the worker and returns the sender for its requests.
pub fn spawn_feed_worker(
    client: GithubClient,
    event_tx: UnboundedSender<AppEvent>,
) -> UnboundedSender<FeedRequest> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(feed_worker_loop(client, rx, event_tx));
    tx
}

async fn feed_worker_loop(
    client: GithubClient,
    mut rx: UnboundedReceiver<FeedRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    while let Some(request) = rx.recv().await {
        let result = client.search(&request.search).await;
        match &result {
            Ok(items) => tracing::debug!(
                session = request.session,
                kind = ?request.kind,
                page = request.search.page,
                count = items.len(),
                "search page loaded"
            ),
            Err(e) => tracing::warn!(session = request.session, kind = ?request.kind, error = %e, "search failed"),
        }
        let payload = FeedResultPayload { session: request.session, kind: request.kind, result };
        if event_tx.send(AppEvent::FeedResult(Box::new(payload))).is_err() {
            break;
        }
    }
    tracing::debug!("feed worker stopped");
}
