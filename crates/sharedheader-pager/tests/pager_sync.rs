mod common;

use common::*;
use mockall::mock;
use mockall::predicate::eq;
use parking_lot::Mutex;
use sharedheader_core::{
    GesturePhase, PagerError, ScrollAnimation, ScrollTarget, SelectCause, SelectionRequest,
};
use sharedheader_pager::{HeaderTransform, PagerController};
use std::sync::Arc;
use std::time::Duration;

mock! {
    pub PageView {
        fn scroll_to(&self, offset: f32, animation: ScrollAnimation);
    }
}

struct MockTarget(Mutex<MockPageView>);

impl ScrollTarget for MockTarget {
    fn scroll_to(&self, offset: f32, animation: ScrollAnimation) {
        self.0.lock().scroll_to(offset, animation)
    }
}

// Construction

#[test]
fn test_construction_outside_runtime_fails() {
    let result = PagerController::new(config(), Arc::new(RecordingView::default()), |_| {});
    assert!(matches!(result, Err(PagerError::Runtime(_))));
}

#[tokio::test]
async fn test_invalid_config_fails_fast() {
    let view = Arc::new(RecordingView::default());
    let result = PagerController::new(config().with_header_height(0.0), view.clone(), |_| {});
    assert!(matches!(result, Err(PagerError::InvalidConfig(_))));

    let result = PagerController::new(config().with_page_count(0), view.clone(), |_| {});
    assert!(matches!(result, Err(PagerError::InvalidConfig(_))));

    let result = PagerController::new(config().with_initial_index(3), view, |_| {});
    assert!(matches!(result, Err(PagerError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_initial_position() {
    let h = harness(config().with_initial_index(2));
    assert_eq!(h.controller.selected_index(), 2);
    assert_eq!(h.controller.fractional_index(), 2.0);
    assert_eq!(
        h.pager_view.calls(),
        vec![(2.0 * PAGE_WIDTH, ScrollAnimation::Immediate)]
    );
    assert!(h.controller.page(2).unwrap().is_active());
}

#[tokio::test]
async fn test_page_out_of_range() {
    let h = harness(config());
    assert!(matches!(
        h.controller.page(3),
        Err(PagerError::PageOutOfRange { index: 3, page_count: 3 })
    ));
    assert!(h.controller.remount_page(7).is_err());
}

// Header offset

#[tokio::test(start_paused = true)]
async fn test_header_follows_latest_active_report() {
    let h = harness(config());
    let pages = h.controller.pages();

    let steps: &[(usize, f32)] = &[(0, 40.0), (0, 310.0), (1, 5.0), (0, 120.0), (0, -30.0)];
    for &(page, offset) in steps {
        pages[page].report(offset);
    }
    assert_eq!(h.controller.header_offset(), 0.0);
    assert_eq!(h.controller.current_page_offset(), -30.0);

    h.controller.set_selected_index(1);
    assert_eq!(h.controller.header_offset(), 0.0);
    pages[0].report(200.0);
    assert_eq!(h.controller.header_offset(), 0.0);
    pages[1].report(900.0);
    assert_eq!(h.controller.header_offset(), 250.0);
    pages[1].report(75.5);
    assert_eq!(h.controller.header_offset(), 75.5);
}

#[tokio::test]
async fn test_header_transform() {
    let h = harness(config());
    h.controller.page(0).unwrap().report(90.0);
    assert_eq!(
        h.controller.header_transform(),
        HeaderTransform {
            height: 250.0,
            translate_y: -90.0,
        }
    );
}

// Adjustments

#[tokio::test(start_paused = true)]
async fn test_switch_adjusts_previous_page_only() {
    let h = harness(config());
    let p0 = h.controller.page(0).unwrap();
    let p1 = h.controller.page(1).unwrap();

    p0.report(120.0);
    quiesce().await;
    assert_eq!(p1.committed_adjustments(), 1);
    assert_eq!(p0.committed_adjustments(), 0);

    h.swipe_to_page(1);
    yield_briefly().await;
    assert_eq!(p0.pending_adjustment(), None);

    quiesce().await;
    assert_eq!(p0.pending_adjustment(), Some(120.0));
    assert_eq!(p0.committed_adjustments(), 1);
    assert_eq!(p1.committed_adjustments(), 1);
    assert_eq!(h.controller.header_offset(), 120.0);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_header_changes_commit_once() {
    let h = harness(config());
    let p0 = h.controller.page(0).unwrap();
    let p1 = h.controller.page(1).unwrap();
    let p2 = h.controller.page(2).unwrap();

    let mut view = MockPageView::new();
    view.expect_scroll_to()
        .with(eq(30.0_f32), eq(ScrollAnimation::Immediate))
        .times(1)
        .return_const(());
    let target = Arc::new(MockTarget(Mutex::new(view)));
    p1.attach_scroll_target(target.clone()).unwrap();

    for offset in [10.0, 20.0, 30.0] {
        p0.report(offset);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(p2.committed_adjustments(), 0);

    quiesce().await;
    assert_eq!(p1.committed_adjustments(), 1);
    assert_eq!(p1.pending_adjustment(), None);
    assert_eq!(p2.committed_adjustments(), 1);
    assert_eq!(p2.pending_adjustment(), Some(30.0));

    p1.detach_scroll_target();
    target.0.lock().checkpoint();
}

#[tokio::test(start_paused = true)]
async fn test_header_at_rest_above_bound_does_not_reschedule() {
    let h = harness(config());
    let p0 = h.controller.page(0).unwrap();
    let p1 = h.controller.page(1).unwrap();

    p0.report(300.0);
    quiesce().await;
    p0.report(500.0);
    p0.report(800.0);
    quiesce().await;
    assert_eq!(p1.committed_adjustments(), 1);
    assert_eq!(p1.pending_adjustment(), Some(250.0));
}

#[tokio::test(start_paused = true)]
async fn test_activation_flushes_recent_header_movement() {
    let h = harness(config());
    let p0 = h.controller.page(0).unwrap();
    let p1 = h.controller.page(1).unwrap();

    p0.report(100.0);
    h.swipe_to_page(1);
    yield_briefly().await;

    assert_eq!(p1.pending_adjustment(), Some(100.0));
    assert_eq!(p1.committed_adjustments(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_inactive_report_does_not_feed_back() {
    let h = harness(config());
    let p0 = h.controller.page(0).unwrap();
    let p1 = h.controller.page(1).unwrap();
    let echo = EchoView::attach(&p1);

    p0.report(180.0);
    quiesce().await;
    assert_eq!(echo.jumps(), vec![180.0]);
    assert_eq!(p1.scroll_offset(), 180.0);

    // The echoed report from page 1 must not disturb the header.
    p0.report(60.0);
    quiesce().await;
    assert_eq!(h.controller.header_offset(), 60.0);
    assert_eq!(echo.jumps(), vec![180.0, 60.0]);
    assert!(echo.all_immediate());
}

#[tokio::test(start_paused = true)]
async fn test_remount_recreates_page_state() {
    let h = harness(config());
    let p0 = h.controller.page(0).unwrap();
    let p2 = h.controller.page(2).unwrap();

    p0.report(250.0);
    quiesce().await;
    assert_eq!(p2.pending_adjustment(), Some(250.0));

    let fresh = h.controller.remount_page(2).unwrap();
    assert_eq!(fresh.pending_adjustment(), None);
    assert_eq!(fresh.scroll_offset(), 0.0);
    assert!(!Arc::ptr_eq(&fresh, &p2));

    quiesce().await;
    assert_eq!(fresh.pending_adjustment(), Some(250.0));
    assert_eq!(fresh.committed_adjustments(), 1);
}

// Selection

#[tokio::test(start_paused = true)]
async fn test_dragging_without_settle_keeps_selection() {
    let h = harness(config());
    for offset in [20.0, 120.0, 260.0, 380.0, 150.0] {
        h.controller.on_pager_scroll(offset);
        assert_eq!(h.controller.fractional_index(), offset / PAGE_WIDTH);
        assert_eq!(h.controller.selected_index(), 0);
    }
    assert_eq!(h.controller.phase(), GesturePhase::Dragging { origin: 0 });
    assert!(h.selects().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_settle_fires_on_select_once() {
    let h = harness(config());
    h.swipe_to_page(1);

    assert_eq!(h.controller.selected_index(), 1);
    assert_eq!(h.selects(), vec![1]);
    assert!(!h.controller.is_gesture_in_flight());

    let log = h.controller.selection_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].cause, SelectCause::Settle);
}

#[tokio::test(start_paused = true)]
async fn test_external_select_superseded_mid_drag() {
    let h = harness(config());
    h.controller.on_pager_scroll(100.0);
    h.controller.on_pager_scroll(220.0);

    assert_eq!(h.controller.set_selected_index(2), SelectionRequest::Superseded);
    assert_eq!(h.controller.selected_index(), 0);
    assert!(h
        .pager_view
        .calls()
        .iter()
        .all(|(_, animation)| *animation == ScrollAnimation::Immediate));

    h.controller.on_pager_scroll(PAGE_WIDTH);
    h.controller.on_momentum_end();
    assert_eq!(h.controller.selected_index(), 1);
    assert_eq!(h.selects(), vec![1]);
}

#[tokio::test(start_paused = true)]
async fn test_external_select_when_idle_scrolls_pager() {
    let h = harness(config());
    assert_eq!(
        h.controller.set_selected_index(2),
        SelectionRequest::Accepted { previous: 0 }
    );
    assert_eq!(h.controller.selected_index(), 2);
    assert_eq!(
        h.pager_view.last(),
        Some((2.0 * PAGE_WIDTH, ScrollAnimation::Animated))
    );
    assert!(h.selects().is_empty());
    assert_eq!(h.controller.selection_log()[0].cause, SelectCause::External);

    // The host animates the strip and reports momentum end at the target.
    h.swipe_to_page(2);
    assert_eq!(h.controller.selected_index(), 2);
    assert_eq!(h.selects(), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_selection_is_noop() {
    let h = harness(config());
    let calls_before = h.pager_view.calls().len();
    assert_eq!(h.controller.set_selected_index(0), SelectionRequest::Unchanged);
    assert_eq!(h.pager_view.calls().len(), calls_before);
}

#[tokio::test(start_paused = true)]
async fn test_out_of_range_selection_is_clamped() {
    let h = harness(config());
    h.controller.set_selected_index(42);
    assert_eq!(h.controller.selected_index(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_single_page_settle_limits_fling() {
    let h = harness(config());
    h.swipe(2.0 * PAGE_WIDTH);

    assert_eq!(h.controller.selected_index(), 1);
    assert_eq!(h.selects(), vec![1]);
    assert_eq!(
        h.pager_view.last(),
        Some((PAGE_WIDTH, ScrollAnimation::Animated))
    );
}

#[tokio::test(start_paused = true)]
async fn test_clamped_fling_snap_notifies_once() {
    let h = harness(config());
    h.swipe(2.0 * PAGE_WIDTH);
    h.play_animation();

    assert_eq!(h.controller.selected_index(), 1);
    assert_eq!(h.selects(), vec![1]);
    assert_eq!(h.controller.selection_log().len(), 1);
    assert_eq!(h.controller.pager_offset(), PAGE_WIDTH);
    assert_eq!(h.controller.phase(), GesturePhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_drag_away_during_snap_settles_normally() {
    let h = harness(config());
    h.swipe(2.0 * PAGE_WIDTH);
    h.swipe(0.0);

    assert_eq!(h.controller.selected_index(), 0);
    assert_eq!(h.selects(), vec![1, 0]);
}

#[tokio::test(start_paused = true)]
async fn test_multi_page_fling_when_interval_momentum_enabled() {
    let h = harness(config().with_interval_momentum_disabled(false));
    h.swipe(2.0 * PAGE_WIDTH);
    assert_eq!(h.controller.selected_index(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_owner_echo_does_not_rescroll() {
    let pager_view = Arc::new(RecordingView::default());
    let slot: Arc<Mutex<Option<PagerController>>> = Arc::new(Mutex::new(None));
    let echo = Arc::clone(&slot);
    let controller = PagerController::new(config(), pager_view.clone(), move |index| {
        if let Some(controller) = echo.lock().as_ref() {
            assert_eq!(controller.set_selected_index(index), SelectionRequest::Unchanged);
        }
    })
    .unwrap();
    *slot.lock() = Some(controller.clone());

    controller.on_pager_scroll(PAGE_WIDTH);
    controller.on_momentum_end();
    assert_eq!(controller.selected_index(), 1);
    assert_eq!(pager_view.calls().len(), 1);

    slot.lock().take();
}

#[tokio::test(start_paused = true)]
async fn test_resize_realigns_pager() {
    let h = harness(config());
    h.swipe_to_page(1);
    h.controller.resize(500.0).unwrap();

    assert_eq!(h.pager_view.last(), Some((500.0, ScrollAnimation::Immediate)));
    assert_eq!(h.controller.pager_offset(), 500.0);
    assert_eq!(h.controller.fractional_index(), 1.0);
    assert_eq!(h.controller.page_width(), 500.0);
    assert!(matches!(
        h.controller.resize(0.0),
        Err(PagerError::InvalidConfig(_))
    ));
}

// Index observer

#[tokio::test(start_paused = true)]
async fn test_index_observer_tracks_fraction() {
    let h = harness(config());
    let observer = h.controller.index_observer();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let bridge = observer.clone().bridge(move |value| sink.lock().push(value));

    yield_briefly().await;
    assert_eq!(seen.lock().as_slice(), &[0.0]);

    h.controller.on_pager_scroll(200.0);
    assert_eq!(observer.display(), "0.50");
    yield_briefly().await;
    assert_eq!(seen.lock().last().copied(), Some(0.5));

    h.controller.on_pager_scroll(300.0);
    h.controller.on_pager_scroll(410.0);
    yield_briefly().await;
    assert_eq!(seen.lock().last().copied(), Some(1.025));

    bridge.abort();
}

// Scenarios

#[tokio::test(start_paused = true)]
async fn test_scenario_three_pages_explicit_consumption() {
    let h = harness(config());
    let p0 = h.controller.page(0).unwrap();
    let p1 = h.controller.page(1).unwrap();

    p0.report(300.0);
    assert_eq!(h.controller.header_offset(), 250.0);
    quiesce().await;

    h.swipe_to_page(1);
    quiesce().await;
    assert_eq!(p0.pending_adjustment(), Some(250.0));
    assert_eq!(h.controller.header_offset(), 250.0);

    if let Some(offset) = p1.consume_pending_adjustment() {
        p1.report(offset);
    }
    p1.report(0.0);
    assert_eq!(h.controller.header_offset(), 0.0);
    quiesce().await;

    h.swipe_to_page(0);
    assert_eq!(p0.consume_pending_adjustment(), Some(0.0));
    assert_eq!(p0.consume_pending_adjustment(), None);
    assert_eq!(h.selects(), vec![1, 0]);
}

#[tokio::test(start_paused = true)]
async fn test_scenario_three_pages_with_views() {
    let h = harness(config());
    let pages = h.controller.pages();
    let views: Vec<_> = pages.iter().map(EchoView::attach).collect();

    pages[0].report(300.0);
    quiesce().await;
    assert_eq!(views[1].jumps(), vec![250.0]);
    assert_eq!(views[2].jumps(), vec![250.0]);

    h.swipe_to_page(1);
    quiesce().await;
    assert_eq!(views[0].jumps(), vec![250.0]);
    assert_eq!(views[1].jumps(), vec![250.0]);
    assert_eq!(h.controller.header_offset(), 250.0);

    pages[1].report(0.0);
    assert_eq!(h.controller.header_offset(), 0.0);
    quiesce().await;

    h.swipe_to_page(0);
    quiesce().await;
    assert_eq!(views[0].jumps(), vec![250.0, 0.0]);
    assert_eq!(pages[0].scroll_offset(), 0.0);
    assert_eq!(h.controller.header_offset(), 0.0);
    assert_eq!(h.selects().iter().filter(|&&i| i == 0).count(), 1);
    assert!(views.iter().all(|v| v.all_immediate()));
}

// Runtime affinity

#[test]
fn test_attach_and_bridge_from_plain_thread() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let h = runtime.block_on(async { harness(config()) });
    let p0 = h.controller.page(0).unwrap();
    let p1 = h.controller.page(1).unwrap();

    let view = EchoView::attach(&p1);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let bridge = h
        .controller
        .index_observer()
        .bridge(move |value| sink.lock().push(value));

    p0.report(60.0);
    h.controller.on_pager_scroll(PAGE_WIDTH / 2.0);
    runtime.block_on(async { tokio::time::sleep(Duration::from_millis(200)).await });

    assert_eq!(view.jumps(), vec![60.0]);
    assert_eq!(p1.scroll_offset(), 60.0);
    assert_eq!(seen.lock().last().copied(), Some(0.5));

    bridge.abort();
    drop(h);
}
