//! A headless windowing engine for fixed-row-height lists.
//!
//! For host integration (listener lifecycle, rendering, scroll anchoring), see the
//! `virtual-window-adapter` crate.
//!
//! Given a list of items, a row height, a viewport height and a scroll offset, the engine
//! computes the smallest contiguous index range that covers the viewport (plus overscan on
//! each side) and the absolute top offset of every row in it. The amount of work per frame is
//! bounded by the viewport, never by the length of the list.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - viewport height (`on_resize`)
//! - scroll offset (`on_scroll`)
//! - a clock tick, so the `is_scrolling` hint can expire (`update_scrolling`)
//!
//! ```
//! use virtual_window::{Align, VirtualWindow, WindowOptions};
//!
//! let rows: Vec<u32> = (0..1_000).collect();
//! let mut window = VirtualWindow::new(rows, WindowOptions::new(80)).unwrap();
//! window.on_resize(600);
//!
//! assert_eq!(window.total_height(), 80_000);
//! assert_eq!(window.scroll_to_index(500, Align::Start), Ok(40_000));
//!
//! for row in window.visible_items() {
//!     assert_eq!(row.offset_top, row.index as u64 * 80);
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod debounce;
mod error;
mod options;
mod state;
mod types;
mod window;

#[cfg(test)]
mod tests;

pub use debounce::ScrollingDebounce;
pub use error::{WindowError, WindowResult};
pub use options::WindowOptions;
pub use state::{FrameState, ViewportState};
pub use types::{Align, ScrollDirection, VisibleRange, WindowItem};
pub use window::{OnChangeCallback, VirtualWindow};
