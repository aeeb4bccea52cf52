use alloc::sync::Arc;
use alloc::vec::Vec;
use core::cell::Cell;
use core::cmp;
use core::fmt;

use crate::debounce::ScrollingDebounce;
use crate::{
    Align, FrameState, ScrollDirection, ViewportState, VisibleRange, WindowError, WindowItem,
    WindowOptions, WindowResult,
};

/// A callback fired after the window's state changes.
///
/// The second argument is `is_scrolling`.
pub type OnChangeCallback<T> = Arc<dyn Fn(&VirtualWindow<T>, bool) + Send + Sync>;

/// A headless windowing engine for lists with a uniform row height.
///
/// The window never holds UI objects. Your adapter drives it:
/// - `on_scroll` / `on_resize` when the platform reports scroll or size changes
/// - `update_scrolling` on a frame or timer tick, so the `is_scrolling` hint can expire
///
/// Every query (`visible_range`, `visible_items`, ...) is recomputed from the stored inputs on
/// each call. Calling it twice without mutating anything in between gives the same answer.
///
/// Items are shared with the caller through an `Arc<[T]>` and never mutated. Replacing the list
/// wholesale (`set_items` with a different allocation) is the supported way to change it.
pub struct VirtualWindow<T> {
    items: Arc<[T]>,
    options: WindowOptions,
    scroll_top: u64,
    container_height: u32,
    is_scrolling: bool,
    scroll_direction: Option<ScrollDirection>,
    debounce: ScrollingDebounce,
    on_change: Option<OnChangeCallback<T>>,

    notify_depth: Cell<usize>,
    notify_pending: Cell<bool>,
}

impl<T> VirtualWindow<T> {
    /// Creates a window over `items`.
    ///
    /// Fails with [`WindowError::InvalidItemHeight`] when `options.item_height` is zero. If
    /// `options.height` is set it becomes the initial container height; otherwise the window
    /// starts unmeasured and serves the first-paint fallback range until `on_resize` is called.
    pub fn new(items: impl Into<Arc<[T]>>, options: WindowOptions) -> WindowResult<Self> {
        if let Err(err) = options.validate() {
            vwarn!(item_height = options.item_height, "VirtualWindow::new: rejected options");
            return Err(err);
        }
        let items = items.into();
        vdebug!(
            count = items.len(),
            item_height = options.item_height,
            overscan = options.overscan,
            "VirtualWindow::new"
        );
        Ok(Self {
            items,
            scroll_top: 0,
            container_height: options.height.unwrap_or(0),
            is_scrolling: false,
            scroll_direction: None,
            debounce: ScrollingDebounce::new(options.scrolling_delay_ms),
            on_change: None,
            options,
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        })
    }

    pub fn options(&self) -> &WindowOptions {
        &self.options
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn shared_items(&self) -> &Arc<[T]> {
        &self.items
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn item_height(&self) -> u32 {
        self.options.item_height
    }

    pub fn overscan(&self) -> usize {
        self.options.overscan
    }

    /// Replaces the item list.
    ///
    /// Passing the same allocation again is a no-op. A different allocation (even with equal
    /// contents) is treated as a new list and notifies `on_change`.
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) {
        let items = items.into();
        if Arc::ptr_eq(&self.items, &items) {
            return;
        }
        vtrace!(prev = self.items.len(), count = items.len(), "set_items");
        self.items = items;
        self.notify();
    }

    pub fn set_item_height(&mut self, item_height: u32) -> WindowResult<()> {
        if item_height == 0 {
            vwarn!(item_height, "set_item_height: rejected");
            return Err(WindowError::InvalidItemHeight { item_height });
        }
        if self.options.item_height == item_height {
            return Ok(());
        }
        self.options.item_height = item_height;
        self.notify();
        Ok(())
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        if self.options.overscan == overscan {
            return;
        }
        self.options.overscan = overscan;
        self.notify();
    }

    pub fn set_scrolling_delay_ms(&mut self, delay_ms: u64) {
        self.options.scrolling_delay_ms = delay_ms;
        self.debounce.set_delay_ms(delay_ms);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&VirtualWindow<T>, bool) + Send + Sync + 'static>,
    ) {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
    }

    fn notify_now(&self) {
        if let Some(cb) = &self.on_change {
            cb(self, self.is_scrolling);
        }
    }

    fn notify(&self) {
        if self.notify_depth.get() > 0 {
            self.notify_pending.set(true);
            return;
        }
        self.notify_now();
    }

    /// Batches multiple updates into a single `on_change` notification.
    pub fn batch_update(&mut self, f: impl FnOnce(&mut Self)) {
        let depth = self.notify_depth.get();
        self.notify_depth.set(depth.saturating_add(1));

        f(self);

        let depth = self.notify_depth.get();
        debug_assert!(depth > 0, "notify_depth underflow");
        let next = depth.saturating_sub(1);
        self.notify_depth.set(next);

        if next == 0 && self.notify_pending.replace(false) {
            self.notify_now();
        }
    }

    pub fn scroll_top(&self) -> u64 {
        self.scroll_top
    }

    pub fn container_height(&self) -> u32 {
        self.container_height
    }

    pub fn is_scrolling(&self) -> bool {
        self.is_scrolling
    }

    pub fn scroll_direction(&self) -> Option<ScrollDirection> {
        self.scroll_direction
    }

    /// The pending `is_scrolling` reset time, if a scroll is in progress.
    pub fn scrolling_deadline_ms(&self) -> Option<u64> {
        self.debounce.deadline_ms()
    }

    /// Applies a scroll position reported by the platform and marks the window as scrolling.
    ///
    /// The value is stored as reported; range queries clamp it into the scrollable extent.
    pub fn on_scroll(&mut self, scroll_top: u64, now_ms: u64) {
        vtrace!(scroll_top, now_ms, "on_scroll");
        self.batch_update(|w| {
            w.set_scroll_top(scroll_top);
            w.notify_scroll_event(now_ms);
        });
    }

    /// Applies a container height reported by the platform.
    pub fn on_resize(&mut self, container_height: u32) {
        if self.container_height == container_height {
            return;
        }
        vtrace!(
            prev = self.container_height,
            container_height,
            "on_resize"
        );
        self.container_height = container_height;
        self.notify();
    }

    /// Marks a scroll event at `now_ms`: sets `is_scrolling` and re-arms the reset deadline.
    pub fn notify_scroll_event(&mut self, now_ms: u64) {
        self.debounce.arm(now_ms);
        self.set_is_scrolling(true);
    }

    /// Clears `is_scrolling` once `scrolling_delay_ms` has passed since the last scroll event.
    ///
    /// Call this from your frame or timer tick.
    pub fn update_scrolling(&mut self, now_ms: u64) {
        if !self.is_scrolling {
            return;
        }
        if self.debounce.poll(now_ms) {
            self.set_is_scrolling(false);
        }
    }

    // Only turned on through `notify_scroll_event`, which arms the reset deadline.
    fn set_is_scrolling(&mut self, is_scrolling: bool) {
        if self.is_scrolling == is_scrolling {
            return;
        }
        self.is_scrolling = is_scrolling;
        if !is_scrolling {
            self.scroll_direction = None;
            self.debounce.cancel();
        }
        self.notify();
    }

    /// Sets the scroll position without touching the scrolling hint.
    pub fn set_scroll_top(&mut self, scroll_top: u64) {
        if self.scroll_top == scroll_top {
            return;
        }
        let prev = self.scroll_top;
        self.scroll_top = scroll_top;
        self.scroll_direction = match scroll_top.cmp(&prev) {
            cmp::Ordering::Greater => Some(ScrollDirection::Forward),
            cmp::Ordering::Less => Some(ScrollDirection::Backward),
            cmp::Ordering::Equal => self.scroll_direction,
        };
        self.notify();
    }

    pub fn set_scroll_top_clamped(&mut self, scroll_top: u64) {
        let clamped = self.clamp_scroll_top(scroll_top);
        self.set_scroll_top(clamped);
    }

    /// Returns a lightweight snapshot of the current viewport state.
    pub fn viewport_state(&self) -> ViewportState {
        ViewportState {
            scroll_top: self.scroll_top,
            container_height: self.container_height,
        }
    }

    /// Returns the viewport snapshot plus the scrolling hint.
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            viewport: self.viewport_state(),
            is_scrolling: self.is_scrolling,
        }
    }

    /// Restores a previously captured snapshot.
    ///
    /// When `frame.is_scrolling` is `true`, the reset deadline is re-armed as if a scroll event
    /// happened at `now_ms`.
    pub fn restore_frame_state(&mut self, frame: FrameState, now_ms: u64) {
        self.batch_update(|w| {
            w.on_resize(frame.viewport.container_height);
            w.set_scroll_top_clamped(frame.viewport.scroll_top);
            if frame.is_scrolling {
                w.notify_scroll_event(now_ms);
            } else {
                w.set_is_scrolling(false);
            }
        });
    }

    /// `count * item_height`. Size the host's spacer element with this.
    pub fn total_height(&self) -> u64 {
        (self.items.len() as u64).saturating_mul(self.options.item_height as u64)
    }

    pub fn max_scroll_top(&self) -> u64 {
        self.total_height()
            .saturating_sub(self.container_height as u64)
    }

    pub fn clamp_scroll_top(&self, scroll_top: u64) -> u64 {
        scroll_top.min(self.max_scroll_top())
    }

    pub fn item_top(&self, index: usize) -> Option<u64> {
        (index < self.items.len()).then(|| (index as u64).saturating_mul(self.item_height() as u64))
    }

    pub fn item_bottom(&self, index: usize) -> Option<u64> {
        let top = self.item_top(index)?;
        Some(top.saturating_add(self.item_height() as u64))
    }

    /// Index of the row covering `offset`, clamped to the last row.
    pub fn index_at_offset(&self, offset: u64) -> Option<usize> {
        let last = self.items.len().checked_sub(1)?;
        Some(index_clamped(offset / self.item_height() as u64, last))
    }

    /// The materialized range (overscan included) for the current viewport.
    ///
    /// Returns `None` only for an empty list.
    pub fn visible_range(&self) -> Option<VisibleRange> {
        self.visible_range_for(self.scroll_top, self.container_height)
    }

    /// Like [`Self::visible_range`], for an arbitrary viewport.
    pub fn visible_range_for(&self, scroll_top: u64, container_height: u32) -> Option<VisibleRange> {
        let last = self.items.len().checked_sub(1)?;
        let overscan = self.options.overscan;

        if container_height == 0 {
            // Unmeasured: give the first paint something to show.
            return Some(VisibleRange {
                start_index: 0,
                end_index: overscan.saturating_mul(2).min(last),
            });
        }

        let item_height = self.options.item_height as u64;
        let view = container_height as u64;
        let top = scroll_top.min(self.total_height().saturating_sub(view));
        let bottom = top.saturating_add(view);

        // `bottom` is exclusive, so the last covered pixel sits in row ceil(bottom / h) - 1.
        let first = index_clamped(top / item_height, last);
        let last_visible = index_clamped(bottom.div_ceil(item_height).saturating_sub(1), last);

        Some(VisibleRange {
            start_index: first.saturating_sub(overscan),
            end_index: cmp::min(last, last_visible.saturating_add(overscan)),
        })
    }

    pub fn for_each_visible_item<'a>(&'a self, f: impl FnMut(WindowItem<'a, T>)) {
        self.for_each_visible_item_for(self.scroll_top, self.container_height, f);
    }

    pub fn for_each_visible_item_for<'a>(
        &'a self,
        scroll_top: u64,
        container_height: u32,
        mut f: impl FnMut(WindowItem<'a, T>),
    ) {
        let Some(range) = self.visible_range_for(scroll_top, container_height) else {
            return;
        };
        let Some(rows) = self.items.get(range.start_index..=range.end_index) else {
            return;
        };

        let item_height = self.options.item_height as u64;
        let mut offset_top = (range.start_index as u64).saturating_mul(item_height);
        for (i, item) in rows.iter().enumerate() {
            f(WindowItem {
                item,
                index: range.start_index + i,
                offset_top,
            });
            offset_top = offset_top.saturating_add(item_height);
        }
    }

    /// Materialized rows for the current viewport, in index order.
    ///
    /// For per-frame rendering, prefer [`Self::for_each_visible_item`] or
    /// [`Self::collect_visible_items`] with a reused buffer.
    pub fn visible_items(&self) -> Vec<WindowItem<'_, T>> {
        let mut out = Vec::new();
        self.collect_visible_items(&mut out);
        out
    }

    /// Collects materialized rows into `out` (clears `out` first).
    pub fn collect_visible_items<'a>(&'a self, out: &mut Vec<WindowItem<'a, T>>) {
        out.clear();
        self.for_each_visible_item(|it| out.push(it));
    }

    /// Programmatically scrolls to an index (no animation).
    ///
    /// This sets `scroll_top` to the computed target and triggers `on_change`. It does **not**
    /// mark the window as scrolling; adapters that want that should feed the returned offset
    /// through `on_scroll`.
    ///
    /// An out-of-range index leaves the viewport untouched and is reported as
    /// [`WindowError::IndexOutOfRange`].
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> WindowResult<u64> {
        match self.scroll_to_index_offset(index, align) {
            Ok(offset) => {
                vtrace!(index, ?align, offset, "scroll_to_index");
                self.set_scroll_top(offset);
                Ok(offset)
            }
            Err(err) => {
                vwarn!(index, count = self.items.len(), "scroll_to_index: out of range");
                Err(err)
            }
        }
    }

    /// Computes the scroll position `scroll_to_index` would apply, without applying it.
    ///
    /// Targets are clamped into `0..=max_scroll_top()`.
    pub fn scroll_to_index_offset(&self, index: usize, align: Align) -> WindowResult<u64> {
        let count = self.items.len();
        if index >= count {
            return Err(WindowError::IndexOutOfRange { index, count });
        }

        let item_height = self.options.item_height as u64;
        let item_top = (index as u64).saturating_mul(item_height);
        let item_bottom = item_top.saturating_add(item_height);
        let view = self.container_height as u64;
        let current_top = self.clamp_scroll_top(self.scroll_top);
        let current_bottom = current_top.saturating_add(view);

        let target = match align {
            Align::Start => item_top,
            Align::End => item_bottom.saturating_sub(view),
            Align::Center => item_top
                .saturating_add(item_height / 2)
                .saturating_sub(view / 2),
            Align::Auto => {
                if item_top < current_top {
                    item_top
                } else if item_bottom > current_bottom {
                    item_bottom.saturating_sub(view)
                } else {
                    return Ok(current_top);
                }
            }
        };

        Ok(self.clamp_scroll_top(target))
    }
}

fn index_clamped(index: u64, last: usize) -> usize {
    usize::try_from(index).map_or(last, |i| i.min(last))
}

impl<T> Clone for VirtualWindow<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
            options: self.options,
            scroll_top: self.scroll_top,
            container_height: self.container_height,
            is_scrolling: self.is_scrolling,
            scroll_direction: self.scroll_direction,
            debounce: self.debounce,
            on_change: self.on_change.clone(),
            notify_depth: Cell::new(0),
            notify_pending: Cell::new(false),
        }
    }
}

impl<T> fmt::Debug for VirtualWindow<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualWindow")
            .field("count", &self.items.len())
            .field("options", &self.options)
            .field("scroll_top", &self.scroll_top)
            .field("container_height", &self.container_height)
            .field("is_scrolling", &self.is_scrolling)
            .field("scroll_direction", &self.scroll_direction)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}
