use alloc::vec::Vec;

/// Live scroll state of a single list.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollState {
    pub scroll_offset: u64,
    pub container_height: u32,
    pub is_scrolling: bool,
}

/// A persistable snapshot of a list's scroll position and measured heights.
///
/// This is useful for restoring a list when the user returns to a page (or a new session) without
/// coupling the engine to any particular storage.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSnapshot {
    pub scroll_offset: u64,
    pub container_height: u32,
    /// `(index, height)` pairs sorted by index.
    pub heights: Vec<(usize, u32)>,
}
