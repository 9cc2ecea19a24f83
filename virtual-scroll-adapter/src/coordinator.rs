use virtual_scroll::VirtualScroll;

use crate::{FrameRequest, FrameScheduler, ScrollContainer, Subscription};

/// Turns raw scroll/resize notifications into engine updates.
///
/// - Scroll events are gated through a single pending animation frame: the first event of a
///   frame requests one, later events in the same frame are dropped. When the frame fires, the
///   container offset is read once and republished.
/// - Every scroll event marks the engine as scrolling and pushes the idle deadline out by
///   `scroll_debounce_ms`; [`Self::poll_idle`] clears the flag once the deadline passes.
/// - [`Self::teardown`] releases everything it acquired: the container subscription, the
///   pending frame and the idle deadline.
#[derive(Debug, Default)]
pub struct EventCoordinator {
    subscription: Option<Subscription>,
    pending_frame: Option<FrameRequest>,
    idle_deadline_ms: Option<u64>,
    coalesced: u64,
}

impl EventCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn subscription(&self) -> Option<Subscription> {
        self.subscription
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending_frame
    }

    pub fn idle_deadline_ms(&self) -> Option<u64> {
        self.idle_deadline_ms
    }

    /// Number of scroll events dropped because a frame was already pending.
    pub fn coalesced_events(&self) -> u64 {
        self.coalesced
    }

    /// Subscribes to `container` and publishes its current geometry into `engine`.
    pub fn listen<C: ScrollContainer + ?Sized>(
        &mut self,
        engine: &mut VirtualScroll,
        container: &mut C,
    ) {
        debug_assert!(
            self.subscription.is_none(),
            "EventCoordinator::listen while already subscribed"
        );
        let subscription = container.subscribe();
        adebug!(subscription = subscription.0, "listen");
        self.subscription = Some(subscription);
        engine.set_container_height(container.client_height());
        engine.set_scroll_offset(container.scroll_top());
    }

    /// Handles a scroll notification.
    ///
    /// Returns `true` if a new frame was requested.
    pub fn on_scroll<S: FrameScheduler + ?Sized>(
        &mut self,
        engine: &mut VirtualScroll,
        scheduler: &mut S,
        now_ms: u64,
    ) -> bool {
        if self.subscription.is_none() {
            return false;
        }
        engine.notify_scroll_event(now_ms);
        self.idle_deadline_ms = Some(now_ms.saturating_add(engine.options().scroll_debounce_ms));

        if self.pending_frame.is_some() {
            self.coalesced = self.coalesced.saturating_add(1);
            return false;
        }
        let request = scheduler.request_frame();
        atrace!(request = request.0, now_ms, "on_scroll: frame requested");
        self.pending_frame = Some(request);
        true
    }

    /// Handles a fired animation frame.
    ///
    /// Frames that are not the pending one (stale or cancelled) are ignored. Returns `true` if the
    /// scroll offset changed.
    pub fn on_frame<C: ScrollContainer + ?Sized>(
        &mut self,
        engine: &mut VirtualScroll,
        container: &C,
        request: FrameRequest,
    ) -> bool {
        if self.pending_frame != Some(request) {
            atrace!(request = request.0, "on_frame: stale request ignored");
            return false;
        }
        self.pending_frame = None;
        let offset = container.scroll_top();
        atrace!(offset, "on_frame");
        engine.set_scroll_offset(offset)
    }

    /// Re-measures the container. Returns `true` if the height changed.
    pub fn on_resize<C: ScrollContainer + ?Sized>(
        &mut self,
        engine: &mut VirtualScroll,
        container: &C,
    ) -> bool {
        if self.subscription.is_none() {
            return false;
        }
        engine.set_container_height(container.client_height())
    }

    /// Clears the scrolling flag once the idle deadline has passed.
    ///
    /// Returns `true` if the flag was cleared by this call.
    pub fn poll_idle(&mut self, engine: &mut VirtualScroll, now_ms: u64) -> bool {
        let Some(deadline) = self.idle_deadline_ms else {
            return false;
        };
        if now_ms < deadline {
            return false;
        }
        self.idle_deadline_ms = None;
        engine.set_is_scrolling(false);
        atrace!(now_ms, "poll_idle: scrolling stopped");
        true
    }

    /// Releases the subscription, cancels any pending frame and disarms the idle deadline.
    pub fn teardown<C: ScrollContainer + ?Sized, S: FrameScheduler + ?Sized>(
        &mut self,
        engine: &mut VirtualScroll,
        container: &mut C,
        scheduler: &mut S,
    ) {
        if let Some(request) = self.pending_frame.take() {
            scheduler.cancel_frame(request);
        }
        if let Some(subscription) = self.subscription.take() {
            adebug!(subscription = subscription.0, "teardown");
            container.unsubscribe(subscription);
        }
        self.idle_deadline_ms = None;
        engine.set_is_scrolling(false);
    }
}
