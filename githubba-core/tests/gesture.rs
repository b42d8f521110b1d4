//! Swipe classification on the top card.

use githubba_core::gesture::{classify, SwipeGesture, DEFAULT_SWIPE_THRESHOLD};
use githubba_core::types::SwipeDirection;

#[test]
fn horizontal_drags_past_threshold_are_swipes() {
    assert_eq!(classify(12, 0, 8), Some(SwipeDirection::Right));
    assert_eq!(classify(-12, 1, 8), Some(SwipeDirection::Left));
    assert_eq!(classify(8, 0, 8), Some(SwipeDirection::Right), "threshold is inclusive");
}

#[test]
fn short_and_vertical_drags_are_suppressed() {
    assert_eq!(classify(5, 0, 8), None);
    assert_eq!(classify(10, 6, 8), None, "mostly vertical");
    assert_eq!(classify(0, -20, 8), None);
}

#[test]
fn detector_tracks_offset_and_reports_on_release() {
    let mut gesture = SwipeGesture::new(4, true, DEFAULT_SWIPE_THRESHOLD);
    gesture.press(40, 10);
    gesture.drag(30, 10);
    assert!(gesture.is_tracking());
    assert_eq!(gesture.offset(), -10);

    assert_eq!(gesture.release(28, 11), Some(SwipeDirection::Left));
    assert_eq!(gesture.record_index(), 4);
    assert!(!gesture.is_tracking());
    assert_eq!(gesture.offset(), 0);
}

#[test]
fn release_without_press_is_nothing() {
    let mut gesture = SwipeGesture::new(0, true, DEFAULT_SWIPE_THRESHOLD);
    assert_eq!(gesture.release(60, 0), None);
}

#[test]
fn disabled_detector_ignores_input() {
    let mut gesture = SwipeGesture::new(1, false, DEFAULT_SWIPE_THRESHOLD);
    gesture.press(10, 10);
    gesture.drag(40, 10);
    assert_eq!(gesture.offset(), 0);
    assert_eq!(gesture.release(40, 10), None);
}

#[test]
fn cancelled_gesture_reports_nothing() {
    let mut gesture = SwipeGesture::new(0, true, DEFAULT_SWIPE_THRESHOLD);
    gesture.press(10, 10);
    gesture.drag(40, 10);
    gesture.cancel();
    assert_eq!(gesture.release(40, 10), None);
}
