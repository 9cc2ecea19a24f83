/// Handle for a scroll listener + resize observer pair registered on a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription(pub u64);

/// Handle for a pending animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollBehavior {
    #[default]
    Instant,
    Smooth,
}

/// The host's scrollable element.
///
/// Implementations wrap whatever the UI toolkit provides (a DOM element, a TUI viewport, a GUI
/// scroll area). The adapter never holds more than one subscription per container.
pub trait ScrollContainer {
    /// Current scroll offset in the scroll axis.
    fn scroll_top(&self) -> u64;

    /// Visible height of the container.
    fn client_height(&self) -> u32;

    fn scroll_to(&mut self, offset: u64, behavior: ScrollBehavior);

    /// Starts delivering scroll (passive) and resize notifications to the adapter.
    fn subscribe(&mut self) -> Subscription;

    /// Stops the notifications registered by `subscribe`.
    fn unsubscribe(&mut self, subscription: Subscription);
}

/// Animation-frame scheduling.
///
/// Hosts without a native animation-frame concept can back this with a fixed-interval timer that
/// approximates the refresh rate. The host calls [`crate::VirtualList::on_frame`] with the request
/// once it fires.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;

    fn cancel_frame(&mut self, request: FrameRequest);
}

/// The full-height element that keeps native scrollbar proportions correct.
pub trait Spacer {
    fn set_height(&mut self, height: u64);
}

impl<F: FnMut(u64)> Spacer for F {
    fn set_height(&mut self, height: u64) {
        self(height)
    }
}
