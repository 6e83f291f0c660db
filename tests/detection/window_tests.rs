//! Tests for the sliding window and the attacker tally.

use deauthwatch::detection::TopSource;
use deauthwatch::detector::{AttackerTally, SlidingWindow};

#[test]
fn test_window_record_and_count() {
    let mut window = SlidingWindow::new(10);
    assert!(window.is_empty());

    window.record(100.0);
    assert_eq!(window.count(), 1);

    window.record(101.0);
    assert_eq!(window.count(), 2);
}

#[test]
fn test_window_eviction_relative_to_now() {
    let mut window = SlidingWindow::new(10);
    for t in [100.0, 103.0, 105.0, 112.0] {
        window.record(t);
    }

    // 114 - 103 = 11 > 10, 114 - 105 = 9
    let removed = window.evict(114.0);
    assert_eq!(removed, 2);
    assert_eq!(window.count(), 2);
    assert_eq!(window.oldest(), Some(105.0));
}

#[test]
fn test_window_evict_is_idempotent() {
    let mut window = SlidingWindow::new(5);
    for t in [0.0, 2.0, 4.0, 6.0] {
        window.record(t);
    }

    window.evict(8.0);
    let once = window.count();
    assert_eq!(window.evict(8.0), 0);
    assert_eq!(window.count(), once);
}

#[test]
fn test_window_reset() {
    let mut window = SlidingWindow::new(10);
    window.record(1.0);
    window.record(2.0);

    window.reset();

    assert!(window.is_empty());
    assert_eq!(window.count(), 0);
}

#[test]
fn test_window_fractional_duration() {
    let mut window = SlidingWindow::with_duration(0.5);
    window.record(1.0);
    window.evict(1.5);
    assert_eq!(window.count(), 1);
    window.evict(1.6);
    assert_eq!(window.count(), 0);
}

#[test]
fn test_tally_top_three() {
    let mut tally = AttackerTally::new();
    for src in ["A", "B", "C", "D", "D", "C", "D"] {
        tally.record(src);
    }

    assert_eq!(
        tally.top(3),
        vec![
            TopSource::new("D", 3),
            TopSource::new("C", 2),
            TopSource::new("A", 1),
        ]
    );
}

#[test]
fn test_tally_tie_break_first_seen() {
    let mut tally = AttackerTally::new();
    for src in ["B", "A", "C"] {
        tally.record(src);
    }

    let names: Vec<String> = tally.top(3).into_iter().map(|t| t.source_id).collect();
    assert_eq!(names, vec!["B", "A", "C"]);
}

#[test]
fn test_tally_reset_clears_everything() {
    let mut tally = AttackerTally::new();
    tally.record("A");
    tally.reset();
    assert!(tally.is_empty());
    assert_eq!(tally.count_for("A"), 0);
}
