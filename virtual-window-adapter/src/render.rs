use alloc::vec::Vec;

use virtual_window::VirtualWindow;

/// One absolutely positioned row produced by the host's render callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedRow<R> {
    pub index: usize,
    pub offset_top: u64,
    pub content: R,
}

/// Everything a host needs to paint one frame of the list.
///
/// Lay out a spacer of `spacer_height` inside the scroll container so the native scrollbar
/// reflects the full list, then place each row at `offset_top`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedList<R> {
    pub spacer_height: u64,
    /// The fixed viewport height from the window options, if the host supplied one.
    pub viewport_height: Option<u32>,
    pub rows: Vec<RenderedRow<R>>,
}

/// Renders the materialized rows.
///
/// `render_item(item, index, is_scrolling)` is called once per row, in index order.
pub fn render<T, R>(
    w: &VirtualWindow<T>,
    render_item: impl FnMut(&T, usize, bool) -> R,
) -> RenderedList<R> {
    let mut rows = Vec::new();
    render_into(w, &mut rows, render_item);
    RenderedList {
        spacer_height: w.total_height(),
        viewport_height: w.options().height,
        rows,
    }
}

/// Like [`render`], reusing `out` (cleared first).
pub fn render_into<T, R>(
    w: &VirtualWindow<T>,
    out: &mut Vec<RenderedRow<R>>,
    mut render_item: impl FnMut(&T, usize, bool) -> R,
) {
    out.clear();
    let is_scrolling = w.is_scrolling();
    w.for_each_visible_item(|it| {
        out.push(RenderedRow {
            index: it.index,
            offset_top: it.offset_top,
            content: render_item(it.item, it.index, is_scrolling),
        });
    });
}
