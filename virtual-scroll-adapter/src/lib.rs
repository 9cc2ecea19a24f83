//! Host adapter for the `virtual-scroll` crate.
//!
//! The `virtual-scroll` crate is UI-agnostic and focuses on the math and state. This crate binds
//! it to a host scroll container through small traits:
//!
//! - [`ScrollContainer`]: the scrollable element (offset, height, scroll-to, subscriptions)
//! - [`FrameScheduler`]: animation-frame requests used to coalesce scroll events
//! - [`Spacer`]: the full-height element sized to the total content height
//!
//! [`VirtualList`] ties them together with an attach/detach lifecycle that releases every
//! subscription, pending frame and timer on detach or drop.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod coordinator;
mod host;
mod list;
mod tween;


pub use coordinator::EventCoordinator;
pub use host::{FrameRequest, FrameScheduler, ScrollBehavior, ScrollContainer, Spacer, Subscription};
pub use list::{Lifecycle, VirtualList};
pub use tween::{Easing, Tween};
