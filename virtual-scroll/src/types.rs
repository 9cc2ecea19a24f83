/// Where `scroll_to_index` places the target item inside the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Align {
    /// Item top at the viewport top.
    Start,
    /// Item midpoint at the viewport midpoint.
    Center,
    /// Item bottom at the viewport bottom.
    End,
    /// Keep the current offset if the item is fully visible, otherwise scroll the least amount.
    Auto,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// A row of the metrics table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemMetrics {
    pub index: usize,
    pub offset_top: u64,
    pub height: u32,
}

impl ItemMetrics {
    pub fn bottom(&self) -> u64 {
        self.offset_top.saturating_add(self.height as u64)
    }

    /// `true` if the item lies entirely above `offset`.
    ///
    /// A zero-height item at exactly `offset` does not.
    pub fn ends_before(&self, offset: u64) -> bool {
        self.offset_top < offset && self.bottom() <= offset
    }
}

/// Index bounds into the metrics table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibleRange {
    pub start: usize,
    pub end: usize, // exclusive
}

impl VisibleRange {
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end
    }
}

/// An item of the rendered window, positioned inside the full-height spacer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowedItem {
    pub index: usize,
    pub offset_top: u64,
    pub height: u32,
    /// `true` when the item intersects the viewport itself (not just the overscan margin).
    pub is_visible: bool,
}

impl WindowedItem {
    pub fn bottom(&self) -> u64 {
        self.offset_top.saturating_add(self.height as u64)
    }
}
