//! Host integration for the `virtual-window` crate.
//!
//! The `virtual-window` crate is UI-agnostic and focuses on the windowing math and state. This
//! crate provides the small, framework-neutral pieces a host needs around it:
//!
//! - [`VirtualList`]: mounts a window onto a [`ScrollHost`], holding the scroll listener and
//!   resize observer for exactly as long as it is mounted
//! - [`render`]: positioned rows plus the spacer height for one frame
//! - Scroll anchoring (keep the same record under the viewport when the list is replaced)
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod anchor;
mod error;
mod host;
mod list;
mod render;


pub use anchor::{ScrollAnchor, apply_anchor, capture_first_visible_anchor};
pub use error::MountError;
pub use host::{Listener, ScrollHost, ViewportEvent};
pub use list::VirtualList;
pub use render::{RenderedList, RenderedRow, render, render_into};
