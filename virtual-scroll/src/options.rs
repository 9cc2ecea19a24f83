pub const DEFAULT_ITEM_HEIGHT: u32 = 50;
pub const DEFAULT_OVERSCAN: usize = 5;
pub const DEFAULT_THRESHOLD: usize = 100;
pub const DEFAULT_CONTAINER_HEIGHT: u32 = 400;
/// One frame at 60fps.
pub const DEFAULT_SCROLL_DEBOUNCE_MS: u64 = 16;

/// Configuration for [`crate::VirtualScroll`].
///
/// Every field has a default, so hosts usually start from `ScrollOptions::default()` and chain a
/// few `with_*` calls. With `feature = "serde"`, missing fields in a deserialized document fall
/// back to the same defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrollOptions {
    /// Fixed height applied to every item without a recorded measurement.
    pub item_height: u32,

    /// Extra items rendered on each side of the viewport.
    pub overscan: usize,

    /// Item count below which windowing is disabled and every item is rendered.
    pub threshold: usize,

    /// Viewport height used until the host reports a real measurement.
    pub container_height: u32,

    /// Enables per-index measured heights (see [`crate::VirtualScroll::measure_item`]).
    pub enable_dynamic_height: bool,

    /// Quiet period after the last scroll event before `is_scrolling` is cleared.
    pub scroll_debounce_ms: u64,
}

impl Default for ScrollOptions {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            overscan: DEFAULT_OVERSCAN,
            threshold: DEFAULT_THRESHOLD,
            container_height: DEFAULT_CONTAINER_HEIGHT,
            enable_dynamic_height: false,
            scroll_debounce_ms: DEFAULT_SCROLL_DEBOUNCE_MS,
        }
    }
}

impl ScrollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_container_height(mut self, container_height: u32) -> Self {
        self.container_height = container_height;
        self
    }

    pub fn with_dynamic_height(mut self, enabled: bool) -> Self {
        self.enable_dynamic_height = enabled;
        self
    }

    pub fn with_scroll_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.scroll_debounce_ms = delay_ms;
        self
    }

    /// Whether a collection of `count` items is large enough to be windowed.
    pub fn is_virtual_for(&self, count: usize) -> bool {
        count >= self.threshold
    }
}
