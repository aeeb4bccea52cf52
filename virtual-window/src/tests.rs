use crate::*;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }
}

fn rows(count: usize) -> Vec<usize> {
    (0..count).collect()
}

fn window(count: usize, item_height: u32, container_height: u32) -> VirtualWindow<usize> {
    let mut w = VirtualWindow::new(rows(count), WindowOptions::new(item_height)).unwrap();
    w.on_resize(container_height);
    w
}

fn range(w: &VirtualWindow<usize>) -> VisibleRange {
    w.visible_range().expect("non-empty list")
}

fn bound(container_height: u32, item_height: u32, overscan: usize) -> usize {
    container_height.div_ceil(item_height) as usize + 2 * overscan + 1
}

#[test]
fn fixed_height_range_and_total() {
    let w = window(1000, 80, 600);
    assert_eq!(w.total_height(), 80_000);
    assert_eq!(w.max_scroll_top(), 79_400);

    // Rows 0..=7 cover 0..640, plus 5 rows of overscan below.
    let r = range(&w);
    assert_eq!(r.start_index, 0);
    assert_eq!(r.end_index, 12);
}

#[test]
fn overscan_applies_on_both_sides() {
    let mut w = window(100, 1, 10);
    w.set_overscan(1);
    w.set_scroll_top(50);
    assert_eq!(
        range(&w),
        VisibleRange {
            start_index: 49,
            end_index: 60,
        }
    );
}

#[test]
fn defaults_match_documented_values() {
    let opts = WindowOptions::new(24);
    assert_eq!(opts.overscan, 5);
    assert_eq!(opts.scrolling_delay_ms, 150);
    assert_eq!(opts.height, None);
}

#[test]
fn zero_item_height_is_rejected() {
    let err = VirtualWindow::new(rows(10), WindowOptions::new(0)).unwrap_err();
    assert_eq!(err, WindowError::InvalidItemHeight { item_height: 0 });

    let mut w = window(10, 20, 100);
    assert_eq!(
        w.set_item_height(0),
        Err(WindowError::InvalidItemHeight { item_height: 0 })
    );
    assert_eq!(w.item_height(), 20);
}

#[test]
fn unmeasured_container_serves_first_paint_fallback() {
    let w = VirtualWindow::new(rows(1000), WindowOptions::new(80)).unwrap();
    assert_eq!(w.container_height(), 0);
    assert_eq!(
        w.visible_range(),
        Some(VisibleRange {
            start_index: 0,
            end_index: 10,
        })
    );

    // Clamped to the list length.
    let short = VirtualWindow::new(rows(4), WindowOptions::new(80)).unwrap();
    assert_eq!(
        short.visible_range(),
        Some(VisibleRange {
            start_index: 0,
            end_index: 3,
        })
    );
}

#[test]
fn fixed_height_option_seeds_container_height() {
    let opts = WindowOptions::new(80).with_height(Some(600));
    let mut w = VirtualWindow::new(rows(1000), opts).unwrap();
    assert_eq!(w.container_height(), 600);
    assert_eq!(range(&w).end_index, 12);

    w.on_resize(300);
    assert_eq!(w.container_height(), 300);
}

#[test]
fn empty_list_has_no_range() {
    let w = window(0, 80, 600);
    assert_eq!(w.total_height(), 0);
    assert_eq!(w.visible_range(), None);
    assert!(w.visible_items().is_empty());
    assert_eq!(w.index_at_offset(0), None);
}

#[test]
fn window_covers_viewport_for_every_scroll_position() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..200 {
        let count = rng.gen_range_usize(1, 500);
        let item_height = rng.gen_range_u32(1, 120);
        let container_height = rng.gen_range_u32(1, 2_000);
        let overscan = rng.gen_range_usize(0, 8);

        let mut w = window(count, item_height, container_height);
        w.set_overscan(overscan);
        let max = w.max_scroll_top();

        for _ in 0..20 {
            let scroll_top = rng.gen_range_u64(0, max + 1);
            w.set_scroll_top(scroll_top);
            let r = range(&w);

            let covered_top = w.item_top(r.start_index).unwrap();
            let covered_bottom = w.item_bottom(r.end_index).unwrap();
            let view_bottom = (scroll_top + container_height as u64).min(w.total_height());
            assert!(
                covered_top <= scroll_top && covered_bottom >= view_bottom,
                "gap: count={count} h={item_height} view={container_height} top={scroll_top} range={r:?}"
            );
            assert!(r.count() <= bound(container_height, item_height, overscan));
        }
    }
}

#[test]
fn render_count_does_not_depend_on_list_length() {
    let mut small = window(100, 80, 600);
    let mut huge = window(1_000_000, 80, 600);

    assert_eq!(small.visible_items().len(), huge.visible_items().len());

    // Same offset within a row, away from both ends, must materialize the same number of rows.
    let mut rng = Lcg::new(7);
    let upper = huge.max_scroll_top() - 80 * 10;
    for _ in 0..100 {
        let scroll_top = rng.gen_range_u64(80 * 10, upper);
        huge.set_scroll_top(scroll_top);
        small.set_scroll_top(80 * 10 + scroll_top % 80);
        assert_eq!(huge.visible_items().len(), small.visible_items().len());
        assert!(huge.visible_items().len() <= bound(600, 80, 5));
    }
}

#[test]
fn boundaries_reach_first_and_last_rows() {
    let mut w = window(1000, 80, 600);
    w.set_scroll_top(0);
    assert_eq!(range(&w).start_index, 0);

    w.set_scroll_top(w.max_scroll_top());
    assert_eq!(range(&w).end_index, 999);
    assert_eq!(w.visible_items().last().map(|it| *it.item), Some(999));
}

#[test]
fn overshooting_scroll_is_clamped_for_range_queries() {
    let mut w = window(1000, 80, 600);
    w.set_scroll_top(1_000_000);
    assert_eq!(w.scroll_top(), 1_000_000);
    assert_eq!(w.visible_range(), w.visible_range_for(w.max_scroll_top(), 600));
    assert_eq!(range(&w).end_index, 999);
}

#[test]
fn list_shorter_than_viewport_renders_everything() {
    let w = window(3, 80, 600);
    assert_eq!(w.max_scroll_top(), 0);
    assert_eq!(
        range(&w),
        VisibleRange {
            start_index: 0,
            end_index: 2,
        }
    );
}

#[test]
fn recomputation_is_idempotent() {
    let mut w = window(1000, 80, 600);
    w.on_scroll(12_345, 0);

    let a = w.visible_range();
    let b = w.visible_range();
    assert_eq!(a, b);

    let first: Vec<(usize, u64)> = w.visible_items().iter().map(|it| (it.index, it.offset_top)).collect();
    let second: Vec<(usize, u64)> = w.visible_items().iter().map(|it| (it.index, it.offset_top)).collect();
    assert_eq!(first, second);
}

#[test]
fn visible_items_carry_item_index_and_offset() {
    let items: Vec<&str> = alloc::vec!["ada", "grace", "edsger", "barbara", "ken"];
    let mut w = VirtualWindow::new(items, WindowOptions::new(30).with_overscan(0)).unwrap();
    w.on_resize(60);
    w.set_scroll_top(30);

    let got: Vec<(&str, usize, u64)> = w
        .visible_items()
        .into_iter()
        .map(|it| (*it.item, it.index, it.offset_top))
        .collect();
    assert_eq!(got, alloc::vec![("grace", 1, 30), ("edsger", 2, 60)]);

    let mut buf = Vec::new();
    w.collect_visible_items(&mut buf);
    assert_eq!(buf.len(), 2);
    w.collect_visible_items(&mut buf);
    assert_eq!(buf.len(), 2);
}

#[test]
fn partially_visible_rows_are_included_without_an_extra_row() {
    let mut w = window(100, 80, 80);
    w.set_overscan(0);
    w.set_scroll_top(79);
    // Rows 0 and 1 intersect 79..159; row 2 starts at 160.
    assert_eq!(
        range(&w),
        VisibleRange {
            start_index: 0,
            end_index: 1,
        }
    );

    w.set_scroll_top(80);
    assert_eq!(
        range(&w),
        VisibleRange {
            start_index: 1,
            end_index: 1,
        }
    );
}

#[test]
fn scroll_to_index_start_and_end() {
    let mut w = window(1000, 80, 600);
    assert_eq!(w.scroll_to_index(500, Align::Start), Ok(40_000));
    assert_eq!(w.scroll_top(), 40_000);

    // 80 - 600 would be negative; the target is clamped to the top.
    assert_eq!(w.scroll_to_index(0, Align::End), Ok(0));
    assert_eq!(w.scroll_top(), 0);

    assert_eq!(w.scroll_to_index(999, Align::End), Ok(79_400));
    assert_eq!(range(&w).end_index, 999);

    // The last row cannot be pinned to the top; the target is clamped to the max.
    assert_eq!(w.scroll_to_index(999, Align::Start), Ok(79_400));
}

#[test]
fn scroll_to_index_auto_takes_the_nearest_edge() {
    let mut w = window(1000, 80, 600);
    w.set_scroll_top(40_000);

    // Above the viewport: align start.
    assert_eq!(w.scroll_to_index_offset(0, Align::Auto), Ok(0));

    // Below the viewport: align end.
    assert_eq!(
        w.scroll_to_index_offset(520, Align::Auto),
        Ok(521 * 80 - 600)
    );

    // Fully visible: no change.
    assert_eq!(w.scroll_to_index(503, Align::Auto), Ok(40_000));
    assert_eq!(w.scroll_top(), 40_000);

    // Row 507 spans 40560..40640 and pokes out of 40000..40600.
    assert_eq!(w.scroll_to_index_offset(507, Align::Auto), Ok(40_040));
}

#[test]
fn scroll_to_index_auto_clamps_a_stale_position() {
    let mut w = window(1000, 80, 600);
    w.set_scroll_top(39_500);
    w.set_items(rows(500));
    assert_eq!(w.max_scroll_top(), 39_400);

    // Judged against the rendered viewport 39400..40000, not the stored 39500.
    assert_eq!(w.scroll_to_index_offset(499, Align::Auto), Ok(39_400));
    assert_eq!(w.scroll_to_index_offset(493, Align::Auto), Ok(39_400));
    assert_eq!(w.scroll_to_index_offset(492, Align::Auto), Ok(492 * 80));

    w.on_scroll(1_000_000, 0);
    for index in [0, 250, 499] {
        let offset = w.scroll_to_index_offset(index, Align::Auto).unwrap();
        assert!(offset <= w.max_scroll_top(), "index={index} offset={offset}");
    }
}

#[test]
fn scroll_to_index_center() {
    let w = window(1000, 80, 600);
    assert_eq!(
        w.scroll_to_index_offset(100, Align::Center),
        Ok(100 * 80 + 40 - 300)
    );
    assert_eq!(w.scroll_to_index_offset(1, Align::Center), Ok(0));
}

#[test]
fn scroll_to_out_of_range_index_is_reported_and_ignored() {
    let mut w = window(10, 80, 600);
    w.set_scroll_top(200);
    let before = w.frame_state();

    assert_eq!(
        w.scroll_to_index(10, Align::Start),
        Err(WindowError::IndexOutOfRange {
            index: 10,
            count: 10,
        })
    );
    assert_eq!(w.frame_state(), before);

    let mut empty = window(0, 80, 600);
    assert!(empty.scroll_to_index(0, Align::Auto).is_err());
}

#[test]
fn last_row_is_reachable_for_random_geometry() {
    let mut rng = Lcg::new(42);
    for _ in 0..200 {
        let count = rng.gen_range_usize(1, 10_000);
        let item_height = rng.gen_range_u32(1, 200);
        let container_height = rng.gen_range_u32(1, 3_000);
        let mut w = window(count, item_height, container_height);

        for align in [Align::Start, Align::End, Align::Center, Align::Auto] {
            w.scroll_to_index(count - 1, align).unwrap();
            assert_eq!(range(&w).end_index, count - 1, "align={align:?}");
            assert!(range(&w).contains(count - 1));
        }
    }
}

#[test]
fn scrolling_flag_debounces() {
    let mut w = window(1000, 80, 600);
    assert!(!w.is_scrolling());

    let mut t = 0;
    while t <= 500 {
        w.on_scroll(t * 10, t);
        assert!(w.is_scrolling());
        // Between events, with no more than 50ms idle, the flag holds.
        w.update_scrolling(t + 49);
        assert!(w.is_scrolling());
        t += 50;
    }

    // Last event at 500ms.
    w.update_scrolling(649);
    assert!(w.is_scrolling());
    assert_eq!(w.scrolling_deadline_ms(), Some(650));

    w.update_scrolling(650);
    assert!(!w.is_scrolling());
    assert_eq!(w.scrolling_deadline_ms(), None);
    assert_eq!(w.scroll_direction(), None);
}

#[test]
fn each_scroll_event_restarts_the_delay() {
    let mut w = VirtualWindow::new(
        rows(100),
        WindowOptions::new(10).with_scrolling_delay_ms(100),
    )
    .unwrap();
    w.on_resize(50);

    w.on_scroll(10, 0);
    w.on_scroll(20, 90);
    w.update_scrolling(100);
    assert!(w.is_scrolling());
    w.update_scrolling(189);
    assert!(w.is_scrolling());
    w.update_scrolling(190);
    assert!(!w.is_scrolling());

    // A new delay does not move an already-armed deadline.
    w.on_scroll(30, 200);
    w.set_scrolling_delay_ms(1_000);
    w.update_scrolling(300);
    assert!(!w.is_scrolling());
}

#[test]
fn scrolling_flag_never_changes_the_range() {
    let mut a = window(1000, 80, 600);
    let mut b = window(1000, 80, 600);
    a.on_scroll(5_000, 0);
    b.set_scroll_top(5_000);
    assert!(a.is_scrolling());
    assert!(!b.is_scrolling());
    assert_eq!(a.visible_range(), b.visible_range());
}

#[test]
fn debounce_holds_one_deadline() {
    let mut d = ScrollingDebounce::new(150);
    assert!(!d.poll(1_000));
    d.arm(0);
    d.arm(100);
    assert_eq!(d.deadline_ms(), Some(250));
    assert!(!d.poll(249));
    assert!(d.poll(250));
    assert!(!d.poll(251));
    assert!(!d.is_armed());

    d.arm(0);
    d.cancel();
    assert!(!d.poll(u64::MAX));
}

#[test]
fn resize_shrinks_the_window() {
    let mut w = window(1000, 80, 600);
    w.set_scroll_top(8_000);
    let before = range(&w);

    w.on_resize(300);
    let after = range(&w);
    assert_eq!(w.scroll_top(), 8_000);
    assert!(after.count() <= before.count());
    assert!(after.count() <= bound(300, 80, 5));

    let mut rng = Lcg::new(99);
    for _ in 0..200 {
        let tall = rng.gen_range_u32(1, 2_000);
        let short = rng.gen_range_u32(1, tall + 1);
        let item_height = rng.gen_range_u32(1, 100);
        let mut w = window(5_000, item_height, tall);
        let scroll_top = rng.gen_range_u64(0, w.total_height() - tall as u64 + 1);
        w.set_scroll_top(scroll_top);
        let before = range(&w).count();
        w.on_resize(short);
        let after = range(&w).count();
        assert!(after <= before && after <= bound(short, item_height, 5));
    }
}

#[test]
fn replacing_items_recomputes_and_notifies() {
    let calls = Arc::new(AtomicUsize::new(0));
    let mut w = window(1000, 80, 600);
    w.set_on_change(Some({
        let calls = Arc::clone(&calls);
        move |_: &VirtualWindow<usize>, _: bool| {
            calls.fetch_add(1, Ordering::Relaxed);
        }
    }));

    let same = Arc::clone(w.shared_items());
    w.set_items(same);
    assert_eq!(calls.load(Ordering::Relaxed), 0);

    w.set_scroll_top(w.max_scroll_top());
    assert_eq!(calls.load(Ordering::Relaxed), 1);

    w.set_items(rows(20));
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    assert_eq!(w.count(), 20);
    assert_eq!(range(&w).end_index, 19);

    // Equal contents, new allocation: still a new list.
    w.set_items(rows(20));
    assert_eq!(calls.load(Ordering::Relaxed), 3);
}

#[test]
fn on_scroll_notifies_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let scrolling_seen = Arc::new(AtomicUsize::new(0));
    let mut w = window(1000, 80, 600);
    w.set_on_change(Some({
        let calls = Arc::clone(&calls);
        let scrolling_seen = Arc::clone(&scrolling_seen);
        move |_: &VirtualWindow<usize>, is_scrolling: bool| {
            calls.fetch_add(1, Ordering::Relaxed);
            if is_scrolling {
                scrolling_seen.fetch_add(1, Ordering::Relaxed);
            }
        }
    }));

    w.on_scroll(500, 0);
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    assert_eq!(scrolling_seen.load(Ordering::Relaxed), 1);

    w.batch_update(|w| {
        w.on_resize(300);
        w.on_scroll(900, 10);
        w.set_overscan(2);
    });
    assert_eq!(calls.load(Ordering::Relaxed), 2);

    w.update_scrolling(200);
    assert_eq!(calls.load(Ordering::Relaxed), 3);
}

#[test]
fn scroll_direction_follows_offsets() {
    let mut w = window(1000, 80, 600);
    assert_eq!(w.scroll_direction(), None);
    w.on_scroll(100, 0);
    assert_eq!(w.scroll_direction(), Some(ScrollDirection::Forward));
    w.on_scroll(50, 10);
    assert_eq!(w.scroll_direction(), Some(ScrollDirection::Backward));
}

#[test]
fn index_at_offset_clamps_to_last_row() {
    let w = window(10, 80, 600);
    assert_eq!(w.index_at_offset(0), Some(0));
    assert_eq!(w.index_at_offset(79), Some(0));
    assert_eq!(w.index_at_offset(80), Some(1));
    assert_eq!(w.index_at_offset(u64::MAX), Some(9));
    assert_eq!(w.item_top(10), None);
}

#[test]
fn item_height_change_rescales_geometry() {
    let mut w = window(100, 80, 600);
    w.set_item_height(40).unwrap();
    assert_eq!(w.total_height(), 4_000);
    assert_eq!(w.scroll_to_index_offset(50, Align::Start), Ok(2_000));
}

#[test]
fn frame_state_round_trips_through_restore() {
    let mut a = window(1000, 80, 600);
    a.on_scroll(4_321, 0);
    let frame = a.frame_state();

    let mut b = window(1000, 80, 0);
    b.restore_frame_state(frame, 1_000);
    assert_eq!(b.frame_state(), frame);
    assert_eq!(b.scrolling_deadline_ms(), Some(1_150));

    let idle = FrameState {
        viewport: ViewportState {
            scroll_top: u64::MAX,
            container_height: 300,
        },
        is_scrolling: false,
    };
    b.restore_frame_state(idle, 2_000);
    assert!(!b.is_scrolling());
    assert_eq!(b.scroll_top(), b.max_scroll_top());
}

#[test]
fn scrolling_hint_is_always_backed_by_a_deadline() {
    let mut w = window(1000, 80, 600);

    w.on_scroll(800, 0);
    assert_eq!(w.scrolling_deadline_ms(), Some(150));
    w.update_scrolling(u64::MAX);
    assert!(!w.is_scrolling());
    assert_eq!(w.scrolling_deadline_ms(), None);

    let frame = FrameState {
        viewport: w.viewport_state(),
        is_scrolling: true,
    };
    w.restore_frame_state(frame, 500);
    assert!(w.is_scrolling());
    assert_eq!(w.scrolling_deadline_ms(), Some(650));
    w.update_scrolling(u64::MAX);
    assert!(!w.is_scrolling());
}

#[test]
fn clone_keeps_geometry_and_shares_items() {
    let mut w = window(1000, 80, 600);
    w.on_scroll(800, 0);
    let c = w.clone();
    assert!(Arc::ptr_eq(w.shared_items(), c.shared_items()));
    assert_eq!(c.frame_state(), w.frame_state());
    assert_eq!(c.visible_range(), w.visible_range());
}
