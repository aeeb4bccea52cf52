use virtual_window::VirtualWindow;

/// A scroll anchor that can be used to preserve visual position across data changes.
///
/// Typical use cases:
/// - a feed or table that loads newer rows above the current position
/// - a wholesale refresh of the list where the viewport should stay on the same record
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollAnchor<K> {
    pub key: K,
    /// The distance from the anchor item's top to the viewport's scroll offset.
    pub offset_in_viewport: u64,
}

/// Captures an anchor for the first visible item (by key).
///
/// Overscan rows are not candidates; the anchor is the row under the viewport's top edge.
/// Returns `None` for an empty list.
pub fn capture_first_visible_anchor<T, K>(
    w: &VirtualWindow<T>,
    key_of: impl Fn(&T) -> K,
) -> Option<ScrollAnchor<K>> {
    let scroll_top = w.clamp_scroll_top(w.scroll_top());
    let index = w.index_at_offset(scroll_top)?;
    let start = w.item_top(index)?;
    let item = w.items().get(index)?;
    Some(ScrollAnchor {
        key: key_of(item),
        offset_in_viewport: scroll_top.saturating_sub(start),
    })
}

/// Applies a previously captured anchor by adjusting the scroll offset.
///
/// The anchor's key is looked up with a linear scan over the window's current items.
///
/// Returns `true` when the anchor was found and applied.
pub fn apply_anchor<T, K: PartialEq>(
    w: &mut VirtualWindow<T>,
    anchor: &ScrollAnchor<K>,
    key_of: impl Fn(&T) -> K,
) -> bool {
    let Some(index) = w.items().iter().position(|it| key_of(it) == anchor.key) else {
        return false;
    };
    let Some(start) = w.item_top(index) else {
        return false;
    };
    w.set_scroll_top_clamped(start.saturating_add(anchor.offset_in_viewport));
    true
}
