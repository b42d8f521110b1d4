//! Pagination coordinator rules, checked without a stack or timers.

use githubba_core::pagination::{LatchPolicy, PaginationCoordinator, PaginationDecision};

use PaginationDecision::{RequestMore, Wait};

#[test]
fn requests_once_when_within_lookahead() {
    let mut coordinator = PaginationCoordinator::default();

    assert_eq!(coordinator.observe(3, 0, false), RequestMore);
    assert!(coordinator.has_pending_request());
    assert_eq!(coordinator.observe(3, 0, false), Wait);
    assert_eq!(coordinator.observe(3, 2, false), Wait);
}

#[test]
fn does_not_request_with_plenty_of_cards_left() {
    let mut coordinator = PaginationCoordinator::default();

    assert_eq!(coordinator.observe(30, 0, false), Wait);
    assert_eq!(coordinator.observe(30, 24, false), Wait);
    assert_eq!(coordinator.observe(30, 25, false), RequestMore, "exactly 5 remaining triggers");
}

#[test]
fn latch_releases_only_after_growth_beyond_threshold_since_last_reset() {
    let mut coordinator = PaginationCoordinator::default();
    assert_eq!(coordinator.observe(3, 0, false), RequestMore);

    // Small increments that add up to the threshold do not count until the
    // total since the baseline exceeds it.
    assert_eq!(coordinator.observe(5, 0, false), Wait);
    assert_eq!(coordinator.observe(8, 0, false), Wait);
    assert!(coordinator.has_pending_request());

    // 9 > 3 + 5: released, and with 9 - 5 = 4 remaining a new request goes out.
    assert_eq!(coordinator.observe(9, 5, false), RequestMore);

    // The baseline is now 9: reaching 14 is not enough, 15 is.
    assert_eq!(coordinator.observe(14, 10, false), Wait);
    assert_eq!(coordinator.observe(15, 10, false), RequestMore);
}

#[test]
fn release_without_shortage_leaves_latch_clear() {
    let mut coordinator = PaginationCoordinator::default();
    assert_eq!(coordinator.observe(3, 0, false), RequestMore);
    assert_eq!(coordinator.observe(33, 0, false), Wait);
    assert!(!coordinator.has_pending_request());
}

#[test]
fn in_flight_fetch_defers_without_latching() {
    let mut coordinator = PaginationCoordinator::default();

    assert_eq!(coordinator.observe(3, 0, true), Wait);
    assert!(!coordinator.has_pending_request(), "nothing was requested, so nothing is latched");
    assert_eq!(coordinator.observe(3, 0, false), RequestMore);
}

#[test]
fn acknowledged_policy_releases_on_ack_not_on_growth() {
    let mut coordinator = PaginationCoordinator::new(5, LatchPolicy::Acknowledged);

    assert_eq!(coordinator.observe(3, 0, false), RequestMore);
    assert_eq!(coordinator.observe(50, 46, false), Wait, "growth alone does not release");

    coordinator.acknowledge();
    assert!(!coordinator.has_pending_request());
    assert_eq!(coordinator.observe(50, 46, false), RequestMore);
}

#[test]
fn acknowledge_is_ignored_under_growth_policy() {
    let mut coordinator = PaginationCoordinator::default();

    assert_eq!(coordinator.observe(3, 0, false), RequestMore);
    coordinator.acknowledge();
    assert!(coordinator.has_pending_request());
    assert_eq!(coordinator.observe(3, 0, false), Wait);
}
