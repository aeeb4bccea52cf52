use crate::{WindowError, WindowResult};

/// Configuration for [`crate::VirtualWindow`].
///
/// This is plain data, so hosts can keep it next to their own settings and (with
/// `feature = "serde"`) load it from config files. Missing fields fall back to the defaults
/// documented on each field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WindowOptions {
    /// Uniform row height. Must be positive.
    pub item_height: u32,

    /// Extra rows materialized on each side of the viewport. Defaults to 5.
    pub overscan: usize,

    /// Idle time after the last scroll event before `is_scrolling` resets. Defaults to 150ms.
    pub scrolling_delay_ms: u64,

    /// Optional fixed viewport height supplied by the host.
    ///
    /// When set, it is used as the container height until the first `on_resize`. Leave it unset
    /// when the height is measured by the platform.
    pub height: Option<u32>,
}

impl WindowOptions {
    pub const DEFAULT_OVERSCAN: usize = 5;
    pub const DEFAULT_SCROLLING_DELAY_MS: u64 = 150;

    pub fn new(item_height: u32) -> Self {
        Self {
            item_height,
            overscan: Self::DEFAULT_OVERSCAN,
            scrolling_delay_ms: Self::DEFAULT_SCROLLING_DELAY_MS,
            height: None,
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_scrolling_delay_ms(mut self, delay_ms: u64) -> Self {
        self.scrolling_delay_ms = delay_ms;
        self
    }

    pub fn with_height(mut self, height: Option<u32>) -> Self {
        self.height = height;
        self
    }

    pub fn validate(&self) -> WindowResult<()> {
        if self.item_height == 0 {
            return Err(WindowError::InvalidItemHeight {
                item_height: self.item_height,
            });
        }
        Ok(())
    }
}

impl Default for WindowOptions {
    /// One-pixel rows. Mostly useful as a base for `serde` defaults; set `item_height` explicitly.
    fn default() -> Self {
        Self::new(1)
    }
}
