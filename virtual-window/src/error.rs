use thiserror::Error;

pub type WindowResult<T> = Result<T, WindowError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum WindowError {
    /// Rows must have a positive height; a zero height would make every offset map to every index.
    #[error("virtual_window: item height must be positive (got {item_height})")]
    InvalidItemHeight { item_height: u32 },

    /// `scroll_to_index` was asked for an index the list does not have. Nothing was changed.
    #[error("virtual_window: index {index} is out of range for {count} items")]
    IndexOutOfRange { index: usize, count: usize },
}
