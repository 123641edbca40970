use std::sync::{
    atomic::{AtomicU32, Ordering},
    Arc,
};

use super::*;
use crate::layout::StripMetrics;

fn strip_of(item_count: usize, viewport_width: u32) -> Carousel {
    Carousel::strip(move || StripMetrics {
        item_count,
        item_width: 200,
        item_gap: 20,
        viewport_width,
    })
}

#[test]
fn backward_from_zero_wraps_to_last() {
    let mut carousel = Carousel::fixed(3);
    carousel.advance(Direction::Backward);
    assert_eq!(carousel.current_index(), 2);
    carousel.advance(Direction::Forward);
    carousel.advance(Direction::Forward);
    assert_eq!(carousel.current_index(), 1);
}

#[test]
fn forward_then_backward_round_trips() {
    let mut carousel = Carousel::fixed(5);
    for start in 0..5 {
        carousel.go_to(start);
        carousel.advance(Direction::Forward);
        carousel.advance(Direction::Backward);
        assert_eq!(carousel.current_index(), start);
    }
}

#[test]
fn full_cycle_returns_to_zero() {
    let mut carousel = Carousel::fixed(4);
    for _ in 0..4 {
        carousel.advance(Direction::Forward);
    }
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn index_stays_in_range_under_mixed_navigation() {
    let mut carousel = Carousel::fixed(5);
    let steps = [
        Direction::Backward,
        Direction::Backward,
        Direction::Forward,
        Direction::Backward,
        Direction::Forward,
        Direction::Forward,
        Direction::Forward,
        Direction::Backward,
    ];
    for (turn, direction) in steps.iter().cycle().take(200).enumerate() {
        carousel.advance(*direction);
        assert!(carousel.current_index() < 5, "escaped range on turn {turn}");
    }
}

#[test]
fn fixed_transition_emits_one_activate_frame() {
    let mut carousel = Carousel::fixed(3);
    let frame = carousel.advance(Direction::Forward);
    assert_eq!(
        frame,
        Some(VisualFrame::Activate {
            index: 1,
            slide_count: 3
        })
    );
}

#[test]
fn empty_carousel_is_inert() {
    let mut carousel = Carousel::fixed(0);
    assert_eq!(carousel.advance(Direction::Forward), None);
    assert_eq!(carousel.advance(Direction::Backward), None);
    assert_eq!(carousel.go_to(3), None);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn strip_reaches_max_index_then_wraps_forward() {
    // 10 items at 220px stride in a 660px viewport: 3 visible, max index 7.
    let mut carousel = strip_of(10, 660);
    assert_eq!(carousel.position_count(), 8);

    carousel.go_to(7);
    assert_eq!(carousel.current_index(), 7);
    let frame = carousel.advance(Direction::Forward);
    assert_eq!(carousel.current_index(), 0);
    assert_eq!(frame, Some(VisualFrame::Translate { offset_px: 0 }));
}

#[test]
fn strip_backward_from_zero_lands_on_max_index() {
    let mut carousel = strip_of(10, 660);
    let frame = carousel.advance(Direction::Backward);
    assert_eq!(carousel.current_index(), 7);
    assert_eq!(frame, Some(VisualFrame::Translate { offset_px: 1540 }));
}

#[test]
fn go_to_clamps_past_the_end() {
    let mut carousel = strip_of(10, 660);
    carousel.go_to(99);
    assert_eq!(carousel.current_index(), 7);

    let mut fixed = Carousel::fixed(3);
    fixed.go_to(99);
    assert_eq!(fixed.current_index(), 2);
}

#[test]
fn viewport_wider_than_strip_pins_index_at_zero() {
    let mut carousel = strip_of(3, 5_000);
    assert_eq!(carousel.position_count(), 1);
    carousel.advance(Direction::Forward);
    carousel.advance(Direction::Backward);
    assert_eq!(carousel.current_index(), 0);
}

#[test]
fn strip_metrics_are_queried_per_transition() {
    let viewport = Arc::new(AtomicU32::new(660));
    let probe_viewport = Arc::clone(&viewport);
    let mut carousel = Carousel::strip(move || StripMetrics {
        item_count: 10,
        item_width: 200,
        item_gap: 20,
        viewport_width: probe_viewport.load(Ordering::Relaxed),
    });

    carousel.go_to(7);
    assert_eq!(carousel.current_index(), 7);

    // Resize: 6 items now fit, so only indices 0..=4 remain reachable. The
    // next transition re-measures and steps from inside the new range.
    viewport.store(1_320, Ordering::Relaxed);
    assert_eq!(carousel.position_count(), 5);
    carousel.advance(Direction::Backward);
    assert_eq!(carousel.current_index(), 3);
}
