/// A platform subscription the list holds while it is mounted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Listener {
    /// Scroll events on the scroll container.
    Scroll,
    /// Size changes of the scroll container (resize observation).
    Resize,
}

/// A platform event relayed into [`crate::VirtualList::handle_event`].
///
/// Scroll events carry no offset: the list reads the current position from the host, so a
/// burst of coalesced events always lands on the latest value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewportEvent {
    Scroll { now_ms: u64 },
    Resize { height: u32 },
}

/// The platform primitives a scroll container has to provide.
///
/// Any platform that can report the current scroll offset, accept a new one, and tell the
/// list when its height changes satisfies this (a DOM element, a TUI pane, a test double).
///
/// `set_scroll_top` may clamp; the list reads `scroll_top` back after writing.
pub trait ScrollHost {
    type Error: core::error::Error + 'static;

    fn scroll_top(&self) -> u64;

    fn set_scroll_top(&mut self, scroll_top: u64);

    /// The current container height, or `0` when it has not been laid out yet.
    fn container_height(&self) -> u32;

    fn attach(&mut self, listener: Listener) -> Result<(), Self::Error>;

    /// Releases a listener previously acquired with `attach`. Must not fail.
    fn detach(&mut self, listener: Listener);
}
