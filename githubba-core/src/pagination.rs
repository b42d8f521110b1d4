//! Decides when the stack should ask the data source for another page.
//!
//! The coordinator is a pure watcher: it is handed the latest snapshot of
//! `(len, current_index, is_fetching)` and answers whether a request should be
//! issued now. A latch keeps it to one outstanding request; how the latch is
//! released depends on the [`LatchPolicy`].

/// Remaining-card count at which another page is requested.
pub const LOOKAHEAD_THRESHOLD: usize = 5;

/// Growth (in records) that counts as "a new batch arrived".
pub const RESET_GROWTH: usize = 5;

/// How the "already requested" latch is released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatchPolicy {
    /// Release once the sequence is more than `n` records longer than it was
    /// at the last release. Requests that return fewer than `n + 1` new
    /// records never release the latch.
    GrowthThreshold(usize),
    /// Release when the data source acknowledges the outstanding request,
    /// whether it succeeded or failed.
    Acknowledged,
}

impl Default for LatchPolicy {
    fn default() -> Self {
        LatchPolicy::GrowthThreshold(RESET_GROWTH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationDecision {
    RequestMore,
    Wait,
}

#[derive(Debug, Clone)]
pub struct PaginationCoordinator {
    lookahead: usize,
    policy: LatchPolicy,
    has_pending_request: bool,
    /// Length at the last latch release; `None` until the first observation.
    baseline_len: Option<usize>,
}

impl Default for PaginationCoordinator {
    fn default() -> Self {
        Self::new(LOOKAHEAD_THRESHOLD, LatchPolicy::default())
    }
}

impl PaginationCoordinator {
    pub fn new(lookahead: usize, policy: LatchPolicy) -> Self {
        Self { lookahead, policy, has_pending_request: false, baseline_len: None }
    }

    pub fn has_pending_request(&self) -> bool {
        self.has_pending_request
    }

    pub fn policy(&self) -> LatchPolicy {
        self.policy
    }

    /// Evaluates one snapshot.
    ///
    /// The reset rule runs first, so a snapshot that both delivers a new batch
    /// and is still short of cards can request again immediately. While the
    /// data source reports a fetch in flight nothing is requested or latched;
    /// the next snapshot re-evaluates.
    ///
    /// On [`PaginationDecision::RequestMore`] the latch is already set and the
    /// caller must issue exactly one request.
    pub fn observe(&mut self, len: usize, current_index: usize, is_fetching: bool) -> PaginationDecision {
        let baseline = *self.baseline_len.get_or_insert(len);

        if let LatchPolicy::GrowthThreshold(growth) = self.policy {
            if len > baseline + growth {
                if self.has_pending_request {
                    tracing::debug!(len, baseline, "new batch arrived, pagination latch released");
                }
                self.has_pending_request = false;
                self.baseline_len = Some(len);
            }
        }

        let remaining = len.saturating_sub(current_index);
        if remaining > self.lookahead || self.has_pending_request || is_fetching {
            return PaginationDecision::Wait;
        }

        self.has_pending_request = true;
        tracing::debug!(len, current_index, remaining, "requesting more repositories");
        PaginationDecision::RequestMore
    }

    /// Records that the outstanding request finished.
    ///
    /// Only meaningful under [`LatchPolicy::Acknowledged`]; ignored otherwise.
    pub fn acknowledge(&mut self) {
        if self.policy == LatchPolicy::Acknowledged {
            self.has_pending_request = false;
        }
    }
}
