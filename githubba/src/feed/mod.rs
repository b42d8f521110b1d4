//! Repository feed backing the card stack.
//!
//! [`FeedState`] is the app-side [`RepositoryFeed`]: an append-only list of
//! repositories for the current session plus the loading flags the stack and
//! the renderer read. Fetching happens in [`worker`]; this module only issues
//! requests and folds results back in.
//!
//! Each refresh or settings change starts a new session. Results tagged with an
//! older session number are dropped on arrival.

pub mod worker;

use std::collections::HashSet;

use chrono::NaiveDate;
use githubba_core::feed::RepositoryFeed;
use githubba_core::github::GithubError;
use githubba_core::search::{FeedQuery, SearchRequest};
use githubba_core::types::{FeedType, RepositoryRecord};
use tokio::sync::mpsc::UnboundedSender;

/// Consecutive random-feed pages with nothing new before giving up. Random
/// draws can land on a page past the end of a small bucket.
pub const EMPTY_PAGE_RETRIES: u32 = 3;

/// Ticks to wait after the first failed request before asking again. Each
/// further failure doubles the wait up to [`MAX_RETRY_BACKOFF_TICKS`].
pub const RETRY_BACKOFF_TICKS: u32 = 8;

pub const MAX_RETRY_BACKOFF_TICKS: u32 = 240;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// First page of a session.
    Initial,
    /// A follow-up page asked for by the stack.
    More,
}

#[derive(Debug, Clone)]
pub struct FeedRequest {
    pub session: u64,
    pub kind: FetchKind,
    pub search: SearchRequest,
}

#[derive(Debug)]
pub struct FeedResultPayload {
    pub session: u64,
    pub kind: FetchKind,
    pub result: Result<Vec<RepositoryRecord>, GithubError>,
}

/// What [`FeedState::apply`] did with a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// The result belonged to an earlier session.
    Discarded,
    /// Records were appended (possibly zero after dedup).
    Appended { added: usize },
    /// The request failed; the message is in [`FeedState::error`].
    Failed,
    /// Nothing new came back and another page was requested in its place.
    Retried,
}

pub struct FeedState {
    records: Vec<RepositoryRecord>,
    seen: HashSet<u64>,
    session: u64,
    /// `None` until the first session starts.
    query: Option<FeedQuery>,
    loading: bool,
    fetching_more: bool,
    empty_pages: u32,
    /// The search has no further pages this session.
    end_of_results: bool,
    failures: u32,
    backoff_ticks: u32,
    error: Option<String>,
    tx: Option<UnboundedSender<FeedRequest>>,
}

impl FeedState {
    /// A feed that sends its requests to `tx`. No session is started yet.
    pub fn new(tx: Option<UnboundedSender<FeedRequest>>) -> Self {
        Self {
            records: Vec::new(),
            seen: HashSet::new(),
            session: 0,
            query: None,
            loading: false,
            fetching_more: false,
            empty_pages: 0,
            end_of_results: false,
            failures: 0,
            backoff_ticks: 0,
            error: None,
            tx,
        }
    }

    pub fn feed_type(&self) -> FeedType {
        self.query.as_ref().map_or_else(FeedType::default, FeedQuery::feed)
    }

    pub fn language(&self) -> Option<&str> {
        self.query.as_ref().and_then(FeedQuery::language)
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// True until the first page of the session has arrived or failed.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a failed request is cooling down.
    pub fn is_backing_off(&self) -> bool {
        self.backoff_ticks > 0
    }

    pub fn end_of_results(&self) -> bool {
        self.end_of_results
    }

    /// Counts down the retry backoff. Returns true on the tick it runs out,
    /// after which [`RepositoryFeed::request_more`] works again.
    pub fn tick(&mut self) -> bool {
        if self.backoff_ticks == 0 {
            return false;
        }
        self.backoff_ticks -= 1;
        self.backoff_ticks == 0
    }

    /// Clears everything and asks for the first page of a new session.
    pub fn start_session(&mut self, feed: FeedType, language: Option<String>, today: NaiveDate, seed: u64) {
        self.session += 1;
        self.records.clear();
        self.seen.clear();
        let query = FeedQuery::new(feed, language, today, seed);
        tracing::info!(session = self.session, %feed, language = ?query.language(), "starting feed session");
        self.query = Some(query);
        self.fetching_more = false;
        self.empty_pages = 0;
        self.end_of_results = false;
        self.failures = 0;
        self.backoff_ticks = 0;
        self.error = None;
        self.loading = true;
        self.send(FetchKind::Initial);
    }

    /// Folds a worker result into the feed.
    pub fn apply(&mut self, payload: FeedResultPayload) -> Applied {
        if payload.session != self.session {
            tracing::debug!(session = payload.session, current = self.session, "stale feed result dropped");
            return Applied::Discarded;
        }
        match payload.kind {
            FetchKind::Initial => self.loading = false,
            FetchKind::More => self.fetching_more = false,
        }

        let items = match payload.result {
            Ok(items) => items,
            Err(e) => {
                self.failures += 1;
                self.backoff_ticks = retry_backoff_ticks(self.failures);
                tracing::warn!(error = %e, failures = self.failures, backoff_ticks = self.backoff_ticks, "feed request failed");
                self.error = Some(e.to_string());
                return Applied::Failed;
            }
        };
        self.error = None;
        self.failures = 0;
        self.backoff_ticks = 0;

        let returned = items.len();
        let before = self.records.len();
        for item in items {
            if self.seen.insert(item.id) {
                self.records.push(item);
            }
        }
        let added = self.records.len() - before;

        if added == 0 && self.feed_type() == FeedType::Random && self.empty_pages < EMPTY_PAGE_RETRIES {
            self.empty_pages += 1;
            tracing::debug!(attempt = self.empty_pages, "random page had nothing new, drawing again");
            match payload.kind {
                FetchKind::Initial => self.loading = true,
                FetchKind::More => self.fetching_more = true,
            }
            self.send(payload.kind);
            return Applied::Retried;
        }
        if added > 0 {
            self.empty_pages = 0;
        } else if returned == 0 || self.feed_type() == FeedType::Random {
            tracing::info!(session = self.session, "no more results this session");
            self.end_of_results = true;
        }
        Applied::Appended { added }
    }

    fn send(&mut self, kind: FetchKind) {
        let Some(query) = self.query.as_mut() else {
            return;
        };
        let request = FeedRequest { session: self.session, kind, search: query.next_request() };
        let Some(tx) = &self.tx else {
            return;
        };
        if tx.send(request).is_err() {
            tracing::error!("feed worker is gone");
            self.loading = false;
            self.fetching_more = false;
            self.error = Some("search worker stopped".to_owned());
        }
    }
}

impl RepositoryFeed for FeedState {
    type Record = RepositoryRecord;

    fn records(&self) -> &[RepositoryRecord] {
        &self.records
    }

    /// The initial page counts as in flight too.
    fn is_fetching_more(&self) -> bool {
        self.loading || self.fetching_more
    }

    fn request_more(&mut self) {
        if self.loading || self.fetching_more || self.session == 0 || self.end_of_results || self.is_backing_off() {
            return;
        }
        self.fetching_more = true;
        self.send(FetchKind::More);
    }
}

fn retry_backoff_ticks(failures: u32) -> u32 {
    let doublings = failures.saturating_sub(1).min(8);
    (RETRY_BACKOFF_TICKS << doublings).min(MAX_RETRY_BACKOFF_TICKS)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};
    use githubba_core::types::{Owner, RepositoryRecord};

    pub(crate) fn repo(id: u64) -> RepositoryRecord {
        let at = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
        RepositoryRecord {
            id,
            name: format!("repo{id}"),
            full_name: format!("octo/repo{id}"),
            owner: Owner { login: "octo".into(), id: 1, avatar_url: String::new(), html_url: String::new() },
            html_url: format!("https://github.com/octo/repo{id}"),
            description: None,
            fork: false,
            created_at: at,
            updated_at: at,
            stargazers_count: 0,
            watchers_count: 0,
            forks_count: 0,
            language: None,
            topics: Vec::new(),
            license: None,
        }
    }
}
