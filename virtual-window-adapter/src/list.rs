use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use virtual_window::{Align, VirtualWindow, WindowResult};

use crate::{
    Listener, MountError, RenderedList, ScrollHost, ViewportEvent, apply_anchor,
    capture_first_visible_anchor, render,
};

/// Listeners held on a host. Releasing happens on drop, so every exit path detaches.
struct Mount<H: ScrollHost> {
    host: H,
    attached: Vec<Listener>,
}

impl<H: ScrollHost> Mount<H> {
    fn attach(host: H) -> Result<Self, MountError<H::Error>> {
        let mut mount = Self {
            host,
            attached: Vec::with_capacity(2),
        };
        for listener in [Listener::Scroll, Listener::Resize] {
            if let Err(source) = mount.host.attach(listener) {
                vwarn!(?listener, held = mount.attached.len(), "mount: attach failed");
                return Err(MountError::Attach { listener, source });
            }
            mount.attached.push(listener);
        }
        Ok(mount)
    }

    fn release(&mut self) {
        while let Some(listener) = self.attached.pop() {
            vtrace!(?listener, "detach");
            self.host.detach(listener);
        }
    }
}

impl<H: ScrollHost> Drop for Mount<H> {
    fn drop(&mut self) {
        self.release();
    }
}

/// A mounted virtualized list: a [`VirtualWindow`] wired to a platform scroll container.
///
/// This type does not draw anything. Adapters drive it by calling:
/// - `handle_event` when the host's scroll or resize listeners fire
/// - `tick(now_ms)` each frame/timer tick (for `is_scrolling` debouncing)
/// - `render` to get the positioned rows and the spacer height for the frame
///
/// The scroll listener and the resize observer are acquired by [`VirtualList::mount`] and
/// released by [`VirtualList::unmount`] or when the list is dropped.
pub struct VirtualList<T, H: ScrollHost> {
    window: VirtualWindow<T>,
    mount: Mount<H>,
}

impl<T, H: ScrollHost> VirtualList<T, H> {
    /// Attaches to `host` and takes the initial measurement.
    ///
    /// The container height is read from the host unless the window options carry a fixed
    /// height. A host that has not been laid out yet may report `0`; the window then serves its
    /// first-paint range until the first resize event arrives.
    pub fn mount(mut window: VirtualWindow<T>, host: H) -> Result<Self, MountError<H::Error>> {
        let mount = Mount::attach(host)?;
        window.batch_update(|w| {
            if w.options().height.is_none() {
                w.on_resize(mount.host.container_height());
            }
            w.set_scroll_top(mount.host.scroll_top());
        });
        vdebug!(
            count = window.count(),
            container_height = window.container_height(),
            scroll_top = window.scroll_top(),
            "VirtualList::mount"
        );
        Ok(Self { window, mount })
    }

    /// Detaches every listener and hands the window back.
    pub fn unmount(self) -> VirtualWindow<T> {
        let Self { window, mut mount } = self;
        mount.release();
        vdebug!(count = window.count(), "VirtualList::unmount");
        window
    }

    pub fn window(&self) -> &VirtualWindow<T> {
        &self.window
    }

    pub fn window_mut(&mut self) -> &mut VirtualWindow<T> {
        &mut self.window
    }

    pub fn host(&self) -> &H {
        &self.mount.host
    }

    /// Mutable access to the platform container, e.g. to apply a user scroll before relaying it.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.mount.host
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.mount.attached
    }

    pub fn handle_event(&mut self, event: ViewportEvent) {
        match event {
            ViewportEvent::Scroll { now_ms } => {
                let scroll_top = self.mount.host.scroll_top();
                self.window.on_scroll(scroll_top, now_ms);
            }
            ViewportEvent::Resize { height } => self.window.on_resize(height),
        }
    }

    /// Runs `is_scrolling` debouncing. Returns the hint after the tick.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.window.update_scrolling(now_ms);
        self.window.is_scrolling()
    }

    /// Scrolls the host so `index` comes into view, then applies the position the host reports.
    ///
    /// The move counts as a scroll event at `now_ms`. Out-of-range indexes leave both the
    /// host and the window untouched.
    ///
    /// Returns the applied offset.
    pub fn scroll_to_index(&mut self, index: usize, align: Align, now_ms: u64) -> WindowResult<u64> {
        let target = match self.window.scroll_to_index_offset(index, align) {
            Ok(target) => target,
            Err(err) => {
                vwarn!(index, count = self.window.count(), "scroll_to_index: out of range");
                return Err(err);
            }
        };
        self.mount.host.set_scroll_top(target);
        let applied = self.mount.host.scroll_top();
        self.window.on_scroll(applied, now_ms);
        Ok(applied)
    }

    /// Renders the current frame. See [`crate::render`].
    pub fn render<R>(&self, render_item: impl FnMut(&T, usize, bool) -> R) -> RenderedList<R> {
        render(&self.window, render_item)
    }

    /// Replaces the items and keeps the first visible record at the same viewport position.
    ///
    /// `key_of` must return a stable identity for a record across both lists. When the
    /// anchored record is missing from the new list, the scroll position is left alone.
    ///
    /// Returns `true` when the anchor was re-applied.
    pub fn replace_items<K: PartialEq>(
        &mut self,
        items: impl Into<Arc<[T]>>,
        key_of: impl Fn(&T) -> K,
    ) -> bool {
        let anchor = capture_first_visible_anchor(&self.window, &key_of);
        let mut applied = false;
        self.window.batch_update(|w| {
            w.set_items(items);
            applied = anchor.is_some_and(|a| apply_anchor(w, &a, &key_of));
        });
        if applied {
            self.mount.host.set_scroll_top(self.window.scroll_top());
            let reported = self.mount.host.scroll_top();
            self.window.set_scroll_top(reported);
        }
        applied
    }
}

impl<T, H: ScrollHost + fmt::Debug> fmt::Debug for VirtualList<T, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualList")
            .field("window", &self.window)
            .field("host", &self.mount.host)
            .field("listeners", &self.mount.attached)
            .finish()
    }
}
