// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_carousel` crate.
//!
//! These drive `CarouselController` through its public contract the way a host
//! would: reporting positions and gestures, and delivering timers from a
//! `TimerQueue` whose clock the test advances.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Size;
use understory_carousel::{
    AutoplayConfig, AutoplayState, Axis, CarouselConfig, CarouselController, CarouselError,
    CarouselEvent, CarouselOutput, GeometryListener, GestureFlags, InternalGeometryState,
    SlotPosition,
};
use understory_timing::{TimerHost, TimerQueue};

const TILE: f64 = 100.0;

type SharedQueue = Rc<RefCell<TimerQueue>>;

fn carousel_with(n: usize, autoplay: bool) -> CarouselController<usize, TimerQueue> {
    let config = CarouselConfig {
        autoplay: AutoplayConfig {
            enabled: autoplay,
            ..AutoplayConfig::default()
        },
        ..CarouselConfig::default()
    };
    let mut c = CarouselController::with_config((0..n).collect(), config, TimerQueue::new())
        .expect("enough pages");
    c.set_viewport_size(Size::new(TILE, TILE)).unwrap();
    c
}

/// Drags forward past the threshold and lets go, as a user flicking one page.
fn swipe_forward<T: TimerHost>(c: &mut CarouselController<usize, T>) -> usize {
    c.on_interaction_begin();
    let update = c.on_viewport_position_changed(1.8 * TILE);
    assert!(update.shifted(), "swipe did not cross the threshold");
    // Paging settles the rewound position back onto the middle tile.
    let settled = c.on_viewport_position_changed(TILE);
    assert!(!settled.shifted());
    c.on_interaction_end(false);
    update.middle_index
}

#[test]
fn forward_scrolling_wraps_around_eight_pages() {
    let mut c = carousel_with(8, false);
    assert_eq!(c.middle_index(), 0);

    assert_eq!(swipe_forward(&mut c), 1);
    assert_eq!(c.window().indices(), [0, 1, 2]);

    for _ in 0..7 {
        swipe_forward(&mut c);
    }
    assert_eq!(c.middle_index(), 0);
    assert_eq!(c.window().indices(), [7, 0, 1]);
}

#[test]
fn backward_scrolling_wraps_to_the_last_page() {
    let mut c = carousel_with(5, false);
    let update = c.on_viewport_position_changed(0.2 * TILE);
    let rebind = update.rebind.expect("backward shift");
    assert_eq!(rebind.slot, SlotPosition::Leading);
    assert_eq!(rebind.loaded_index, 3);
    assert_eq!(rebind.evicted_index, 1);
    assert_eq!(c.middle_index(), 4);
    assert!((update.position - 1.2 * TILE).abs() < 1e-9);
}

#[test]
fn window_invariant_holds_along_a_long_scroll() {
    let mut c = carousel_with(7, false);
    let mut position = TILE;
    // Scroll forward in uneven steps well past several laps, then back.
    for step in [13.0, 27.0, 41.0, 9.0].iter().cycle().take(200) {
        position += step;
        position = c.on_viewport_position_changed(position).position;
        assert_invariant(&c);
    }
    for step in [17.0, 31.0, 5.0].iter().cycle().take(200) {
        position -= step;
        position = c.on_viewport_position_changed(position).position;
        assert_invariant(&c);
    }
}

fn assert_invariant<T: TimerHost>(c: &CarouselController<usize, T>) {
    let n = c.window().page_count();
    let m = c.middle_index();
    assert_eq!(c.window().indices(), [(m + n - 1) % n, m, (m + 1) % n]);
    for binding in c.window_bindings() {
        assert_eq!(binding.handle, binding.index);
    }
}

#[test]
fn recycling_twice_at_the_same_position_shifts_once() {
    let mut c = carousel_with(6, false);
    let first = c.on_viewport_position_changed(1.7 * TILE);
    assert!(first.shifted());
    let again = c.on_viewport_position_changed(first.position);
    assert!(!again.shifted());
    assert_eq!(again.position, first.position);
    assert_eq!(c.middle_index(), 1);
}

#[test]
fn rewind_is_exactly_one_tile_in_the_direction_of_motion() {
    let mut c = carousel_with(6, false);
    let forward = c.on_viewport_position_changed(1.93 * TILE);
    assert!((forward.position - 0.93 * TILE).abs() < 1e-9);
    let backward = c.on_viewport_position_changed(0.31 * TILE);
    assert!((backward.position - 1.31 * TILE).abs() < 1e-9);
}

#[test]
fn resting_on_the_threshold_does_not_flicker() {
    let mut c = carousel_with(6, false);
    for _ in 0..10 {
        assert!(!c.on_viewport_position_changed(1.5 * TILE).shifted());
        assert!(!c.on_viewport_position_changed(0.5 * TILE).shifted());
    }
    assert_eq!(c.middle_index(), 0);
}

#[test]
fn interaction_begin_cancels_armed_timer() {
    let mut c = carousel_with(6, true);
    assert_eq!(c.autoplay_state(), AutoplayState::Armed);
    assert_eq!(c.host().len(), 1);

    c.on_interaction_begin();
    assert_eq!(c.autoplay_state(), AutoplayState::Idle);
    assert!(c.host().is_empty());

    c.on_interaction_end(false);
    assert_eq!(c.autoplay_state(), AutoplayState::Armed);
    assert_eq!(c.host().len(), 1);
}

#[test]
fn interaction_defers_the_next_advance() {
    // Interval 2.5 s; a drag starts at 1.0 s and ends at 1.2 s.
    let mut c = carousel_with(8, true);

    c.host_mut().advance_to(1_000);
    c.on_interaction_begin();
    c.host_mut().advance_to(1_200);
    c.on_interaction_end(false);

    c.host_mut().advance_to(2_500);
    assert!(c.host_mut().pop_due().is_none(), "advanced during the drag window");

    c.host_mut().advance_to(3_699);
    assert!(c.host_mut().pop_due().is_none());

    c.host_mut().advance_to(3_700);
    let due = c.host_mut().pop_due().expect("advance at 3.7 s");
    let advance = c.on_autoplay_timer(due.id).expect("pending timer");
    assert_eq!(advance.to, 2.0 * TILE);
}

#[test]
fn momentum_defers_resumption_until_settle() {
    let mut c = carousel_with(5, true);
    c.on_interaction_begin();
    c.on_interaction_end(true);
    assert_eq!(c.autoplay_state(), AutoplayState::Idle);
    assert!(c.is_interacting());

    c.on_settle_complete();
    assert_eq!(c.autoplay_state(), AutoplayState::Armed);
    assert!(!c.is_interacting());
}

#[test]
fn autoplay_cycle_advances_and_rearms() {
    let mut c = carousel_with(5, true);
    for expected_middle in 1..=6 {
        let deadline = c.host().next_deadline().expect("armed");
        c.host_mut().advance_to(deadline);
        let due = c.host_mut().pop_due().unwrap();
        let advance = c.on_autoplay_timer(due.id).unwrap();
        assert_eq!(c.autoplay_state(), AutoplayState::Firing);
        assert_eq!(advance.duration_ms, 300);

        // Intermediate frames pass through untouched while the advance runs.
        let mid = c.on_viewport_position_changed(1.9 * TILE);
        assert!(!mid.shifted());
        let _ = c.on_viewport_position_changed(advance.to);

        let done = c.on_advance_complete();
        assert!(done.shifted());
        assert_eq!(done.position, TILE);
        assert_eq!(c.middle_index(), expected_middle % 5);
        assert_eq!(c.autoplay_state(), AutoplayState::Armed);
    }
}

#[test]
fn interaction_during_advance_lets_it_finish_without_rearming() {
    let mut c = carousel_with(5, true);
    c.host_mut().advance_to(2_500);
    let due = c.host_mut().pop_due().unwrap();
    let advance = c.on_autoplay_timer(due.id).unwrap();

    c.on_interaction_begin();
    let _ = c.on_viewport_position_changed(advance.to);
    let done = c.on_advance_complete();
    assert!(done.shifted());
    assert_eq!(c.autoplay_state(), AutoplayState::Idle);
    assert!(c.host().is_empty());
}

#[test]
fn refused_timers_leave_the_carousel_scrollable() {
    let pages: Vec<usize> = (0..5).collect();
    let mut c = CarouselController::new(pages, TimerQueue::with_capacity_limit(0)).unwrap();
    c.set_viewport_size(Size::new(TILE, TILE)).unwrap();
    assert_eq!(c.autoplay_state(), AutoplayState::Idle);
    assert!(c.autoplay().is_enabled());

    assert!(c.on_viewport_position_changed(1.6 * TILE).shifted());
}

#[test]
fn set_pages_with_too_few_pages_keeps_state() {
    let mut c = carousel_with(6, true);
    let _ = c.on_viewport_position_changed(1.6 * TILE);
    let armed = c.autoplay().pending_timer();

    let err = c.set_pages(vec![1, 2, 3]).unwrap_err();
    assert_eq!(err, CarouselError::TooFewPages { count: 3 });
    assert_eq!(c.middle_index(), 1);
    assert_eq!(c.window().page_count(), 6);
    assert_eq!(c.autoplay().pending_timer(), armed);
}

#[test]
fn set_pages_restarts_autoplay() {
    let mut c = carousel_with(6, true);
    c.host_mut().advance_to(1_000);
    c.set_pages((0..9).collect()).unwrap();
    assert_eq!(c.host().len(), 1);
    assert_eq!(c.host().next_deadline(), Some(3_500));
    assert_eq!(c.window().page_count(), 9);
}

#[test]
fn axis_switch_keeps_middle_index_and_recenters() {
    let mut c = carousel_with(8, false);
    c.set_viewport_size(Size::new(TILE, 240.0)).unwrap();
    swipe_forward(&mut c);
    swipe_forward(&mut c);
    let _ = c.on_viewport_position_changed(1.3 * TILE);
    let revision = c.revision();

    c.set_axis(Axis::Vertical);
    assert_eq!(c.axis(), Axis::Vertical);
    assert_eq!(c.middle_index(), 2);
    assert_eq!(c.window().indices(), [1, 2, 3]);
    assert_eq!(c.position(), 240.0);
    assert_eq!(c.content_size(), Size::new(TILE, 720.0));
    assert_eq!(c.revision(), revision + 1);

    // The reload itself produced no shift; the next event at center is quiet too.
    assert!(!c.on_viewport_position_changed(240.0).shifted());
    assert_eq!(c.middle_index(), 2);
}

#[test]
fn axis_from_config_string() {
    let axis: Axis = "vertical".parse().unwrap();
    let mut c = carousel_with(4, false);
    c.set_axis(axis);
    assert_eq!(c.axis(), Axis::Vertical);
    assert!("sideways".parse::<Axis>().is_err());
}

#[test]
fn dropping_the_carousel_cancels_its_timer() {
    let queue: SharedQueue = Rc::new(RefCell::new(TimerQueue::new()));
    {
        let c = CarouselController::new((0..4).collect::<Vec<u8>>(), Rc::clone(&queue)).unwrap();
        assert_eq!(c.autoplay_state(), AutoplayState::Armed);
        assert_eq!(queue.borrow().len(), 1);
    }
    assert!(queue.borrow().is_empty());
}

#[test]
fn detached_carousel_does_not_autoplay() {
    let mut c = carousel_with(5, true);
    c.detach();
    assert!(c.host().is_empty());

    c.on_interaction_begin();
    c.on_interaction_end(false);
    c.set_autoplay_enabled(true);
    assert_eq!(c.autoplay_state(), AutoplayState::Idle);

    c.attach();
    assert_eq!(c.autoplay_state(), AutoplayState::Armed);
}

#[test]
fn stale_timer_ids_are_ignored() {
    let mut c = carousel_with(5, true);
    let first = c.autoplay().pending_timer().unwrap();
    c.on_interaction_begin();
    c.on_interaction_end(false);
    assert_ne!(c.autoplay().pending_timer(), Some(first));
    assert!(c.on_autoplay_timer(first).is_none());
    assert_eq!(c.autoplay_state(), AutoplayState::Armed);
}

#[test]
fn nested_carousels_share_one_timer_host() {
    // Five columns scrolling horizontally, each a vertical carousel of four
    // zoomable pages, all delivering timers from the same queue.
    let queue: SharedQueue = Rc::new(RefCell::new(TimerQueue::new()));
    let column_config = CarouselConfig {
        axis: Axis::Vertical,
        autoplay: AutoplayConfig {
            enabled: false,
            ..AutoplayConfig::default()
        },
        ..CarouselConfig::default()
    };
    let columns: Vec<Rc<RefCell<CarouselController<(usize, usize), SharedQueue>>>> = (0..5)
        .map(|col| {
            let pages: Vec<(usize, usize)> = (0..4).map(|row| (row, col)).collect();
            let column =
                CarouselController::with_config(pages, column_config, Rc::clone(&queue)).unwrap();
            Rc::new(RefCell::new(column))
        })
        .collect();

    let mut outer = CarouselController::new(columns.clone(), Rc::clone(&queue)).unwrap();
    outer.set_viewport_size(Size::new(TILE, TILE)).unwrap();
    assert_eq!(queue.borrow().len(), 1, "only the outer carousel autoplays");

    // A zoom inside the visible column holds the outer autoplay.
    let zooming = InternalGeometryState {
        gestures: GestureFlags::ZOOMING | GestureFlags::TRACKING,
        ..InternalGeometryState::default()
    };
    outer.geometry_changed(&zooming);
    assert!(queue.borrow().is_empty());

    // Scroll the middle column vertically while the outer carousel is held.
    let middle = Rc::clone(&outer.window_bindings()[1].handle);
    {
        let mut column = middle.borrow_mut();
        column.set_viewport_size(Size::new(TILE, TILE)).unwrap();
        let update = column.on_viewport_position_changed(1.9 * TILE);
        assert_eq!(update.rebind.map(|r| r.loaded), Some((2, 0)));
    }

    outer.geometry_changed(&InternalGeometryState::default());
    assert_eq!(outer.autoplay_state(), AutoplayState::Armed);
    assert_eq!(queue.borrow().len(), 1);
}

#[test]
fn queued_events_funnel_through_one_control_point() {
    let queue: SharedQueue = Rc::new(RefCell::new(TimerQueue::new()));
    let mut c = CarouselController::new((0..6).collect::<Vec<usize>>(), Rc::clone(&queue)).unwrap();
    c.set_viewport_size(Size::new(TILE, TILE)).unwrap();

    // Timer and gesture callbacks enqueue instead of calling in directly.
    queue.borrow_mut().advance_to(2_500);
    while let Some(due) = queue.borrow_mut().pop_due() {
        c.push_event(CarouselEvent::AutoplayTimerFired(due.id));
    }
    c.push_event(CarouselEvent::ViewportPositionChanged(2.0 * TILE));
    c.push_event(CarouselEvent::AdvanceCompleted);

    let outputs = c.process_events();
    assert_eq!(outputs.len(), 3);
    assert!(matches!(&outputs[0], CarouselOutput::Advance(a) if a.to == 2.0 * TILE));
    assert!(matches!(&outputs[1], CarouselOutput::Position(u) if !u.shifted()));
    assert!(matches!(&outputs[2], CarouselOutput::Position(u) if u.shifted() && u.middle_index == 1));
    assert_eq!(queue.borrow().len(), 1);
}

#[test]
fn interval_change_applies_when_the_timer_is_next_armed() {
    let mut c = carousel_with(6, true);
    assert_eq!(c.host().next_deadline(), Some(2_500));

    c.host_mut().advance_to(400);
    c.set_autoplay_interval_ms(1_000);
    assert_eq!(c.host().next_deadline(), Some(2_500));
    assert_eq!(c.autoplay().interval_ms(), 1_000);

    c.host_mut().advance_to(600);
    c.on_interaction_begin();
    c.on_interaction_end(false);
    assert_eq!(c.host().next_deadline(), Some(1_600));

    c.set_advance_duration_ms(450);
    c.host_mut().advance_to(1_600);
    let due = c.host_mut().pop_due().unwrap();
    let advance = c.on_autoplay_timer(due.id).unwrap();
    assert_eq!(advance.duration_ms, 450);

    let _ = c.on_viewport_position_changed(advance.to);
    let _ = c.on_advance_complete();
    assert_eq!(c.host().next_deadline(), Some(2_600));
}

#[test]
fn repeated_gesture_endings_keep_the_pending_deadline() {
    let mut c = carousel_with(6, true);
    let armed = c.autoplay().pending_timer();

    c.host_mut().advance_to(1_000);
    c.on_settle_complete();
    c.on_interaction_end(false);
    assert_eq!(c.autoplay().pending_timer(), armed);
    assert_eq!(c.host().next_deadline(), Some(2_500));
}

#[test]
fn resizing_during_an_advance_keeps_recycling_held() {
    let mut c = carousel_with(6, true);
    c.host_mut().advance_to(2_500);
    let due = c.host_mut().pop_due().unwrap();
    let _ = c.on_autoplay_timer(due.id).unwrap();

    c.set_viewport_size(Size::new(200.0, TILE)).unwrap();
    assert!(c.is_advancing());
    assert_eq!(c.autoplay_state(), AutoplayState::Firing);
    assert_eq!(c.position(), 200.0);

    // The animation carries on in the resized strip without shifting early.
    assert!(!c.on_viewport_position_changed(390.0).shifted());
    let _ = c.on_viewport_position_changed(400.0);
    let done = c.on_advance_complete();
    assert!(done.shifted());
    assert_eq!(done.position, 200.0);
    assert_eq!(c.middle_index(), 1);
    assert_eq!(c.autoplay_state(), AutoplayState::Armed);
}

#[test]
fn replacing_pages_abandons_an_advance() {
    let mut c = carousel_with(6, true);
    c.host_mut().advance_to(2_500);
    let due = c.host_mut().pop_due().unwrap();
    let _ = c.on_autoplay_timer(due.id).unwrap();

    c.set_pages((0..5).collect()).unwrap();
    assert!(!c.is_advancing());
    assert_eq!(c.autoplay_state(), AutoplayState::Armed);
    assert!(c.on_viewport_position_changed(1.8 * TILE).shifted());
}
