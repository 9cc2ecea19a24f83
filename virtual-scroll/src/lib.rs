//! A headless windowed list-rendering engine.
//!
//! For host integration (scroll/resize event coordination, container lifecycle, smooth
//! scrolling), see the `virtual-scroll-adapter` crate.
//!
//! This crate holds the pure parts of virtual scrolling: a per-item metrics table (offsets and
//! heights), binary-searched visible ranges with overscan, an activation threshold below which
//! every item is rendered, and optional dynamic height measurement.
//!
//! It is UI-agnostic. A host layer is expected to provide:
//! - the item count
//! - container height and scroll offset
//! - measured item heights (only in dynamic-height mode)
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod heights;
mod metrics;
mod options;
pub mod range;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use engine::VirtualScroll;
pub use heights::HeightTracker;
pub use metrics::MetricsTable;
pub use options::{
    DEFAULT_CONTAINER_HEIGHT, DEFAULT_ITEM_HEIGHT, DEFAULT_OVERSCAN, DEFAULT_SCROLL_DEBOUNCE_MS,
    DEFAULT_THRESHOLD, ScrollOptions,
};
pub use state::{ScrollSnapshot, ScrollState};
pub use types::{Align, ItemMetrics, ScrollDirection, VisibleRange, WindowedItem};
