/// Edge preference used by `scroll_to_index` when bringing an index into view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Align {
    /// Put the item's top edge at the top of the viewport.
    Start,
    /// Center the item in the viewport.
    Center,
    /// Put the item's bottom edge at the bottom of the viewport.
    End,
    /// Scroll the least distance needed; items that are already fully visible stay put.
    #[default]
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// The materialized index window, overscan included.
///
/// Both ends are inclusive: `start_index <= end_index < count`. An empty list has no range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start_index: usize,
    pub end_index: usize,
}

impl VisibleRange {
    pub fn count(&self) -> usize {
        self.end_index - self.start_index + 1
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start_index..=self.end_index).contains(&index)
    }
}

/// One materialized row: the caller's item, its absolute index, and its absolute top offset.
#[derive(Debug)]
pub struct WindowItem<'a, T> {
    pub item: &'a T,
    pub index: usize,
    /// `index * item_height`, in the same units as the scroll offset.
    pub offset_top: u64,
}

impl<T> Clone for WindowItem<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for WindowItem<'_, T> {}

impl<T: PartialEq> PartialEq for WindowItem<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.offset_top == other.offset_top && self.item == other.item
    }
}
