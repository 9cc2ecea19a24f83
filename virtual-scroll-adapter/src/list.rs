use alloc::boxed::Box;
use alloc::vec::Vec;

use virtual_scroll::{Align, ScrollOptions, VirtualScroll, VisibleRange, WindowedItem};

use crate::{
    Easing, EventCoordinator, FrameRequest, FrameScheduler, ScrollBehavior, ScrollContainer,
    Spacer, Tween,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifecycle {
    /// No container attached; `scroll_to_index` and `measure_item` are no-ops.
    Uninitialized,
    /// A container is attached and its events are being listened to.
    Active,
}

/// A windowed list bound to a host scroll container.
///
/// This type wraps a [`VirtualScroll`] engine and an [`EventCoordinator`], and owns the attached
/// container for as long as it is attached. Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when the container reports events
/// - `on_frame` when a requested animation frame fires
/// - `tick(now_ms)` on a timer (idle debouncing and tweens)
///
/// Dropping the list detaches the container, so subscriptions and frames never outlive it.
pub struct VirtualList<C: ScrollContainer, S: FrameScheduler> {
    engine: VirtualScroll,
    coordinator: EventCoordinator,
    scheduler: S,
    container: Option<C>,
    spacer: Option<Box<dyn Spacer>>,
    spacer_height: Option<u64>,
    tween: Option<Tween>,
}

impl<C: ScrollContainer, S: FrameScheduler> VirtualList<C, S> {
    pub fn new(count: usize, options: ScrollOptions, scheduler: S) -> Self {
        Self::from_engine(VirtualScroll::new(count, options), scheduler)
    }

    pub fn from_engine(engine: VirtualScroll, scheduler: S) -> Self {
        Self {
            engine,
            coordinator: EventCoordinator::new(),
            scheduler,
            container: None,
            spacer: None,
            spacer_height: None,
            tween: None,
        }
    }

    pub fn engine(&self) -> &VirtualScroll {
        &self.engine
    }

    pub fn coordinator(&self) -> &EventCoordinator {
        &self.coordinator
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn container(&self) -> Option<&C> {
        self.container.as_ref()
    }

    pub fn container_mut(&mut self) -> Option<&mut C> {
        self.container.as_mut()
    }

    pub fn lifecycle(&self) -> Lifecycle {
        if self.container.is_some() {
            Lifecycle::Active
        } else {
            Lifecycle::Uninitialized
        }
    }

    /// Attaches `container`, detaching (and returning) the previous one first.
    pub fn attach_container(&mut self, mut container: C) -> Option<C> {
        let previous = self.detach_container();
        self.coordinator.listen(&mut self.engine, &mut container);
        self.container = Some(container);
        adebug!(
            replaced = previous.is_some(),
            container_height = self.engine.container_height(),
            scroll_offset = self.engine.scroll_offset(),
            "attach_container"
        );
        self.sync_spacer();
        previous
    }

    /// Tears down listeners, pending frames and timers, and hands the container back.
    pub fn detach_container(&mut self) -> Option<C> {
        let mut container = self.container.take()?;
        self.coordinator
            .teardown(&mut self.engine, &mut container, &mut self.scheduler);
        self.tween = None;
        adebug!("detach_container");
        Some(container)
    }

    /// Attaches the height spacer and sizes it immediately. Returns the previous spacer.
    pub fn attach_spacer(&mut self, spacer: impl Spacer + 'static) -> Option<Box<dyn Spacer>> {
        let previous = self.spacer.replace(Box::new(spacer));
        self.spacer_height = None;
        self.sync_spacer();
        previous
    }

    pub fn detach_spacer(&mut self) -> Option<Box<dyn Spacer>> {
        self.spacer_height = None;
        self.spacer.take()
    }

    /// Forwards a container scroll event. Returns `true` if a frame was requested.
    pub fn on_scroll(&mut self, now_ms: u64) -> bool {
        if self.container.is_none() {
            return false;
        }
        self.coordinator
            .on_scroll(&mut self.engine, &mut self.scheduler, now_ms)
    }

    /// Forwards a fired animation frame. Returns `true` if the scroll offset changed.
    pub fn on_frame(&mut self, request: FrameRequest) -> bool {
        let Some(container) = self.container.as_ref() else {
            return false;
        };
        self.coordinator
            .on_frame(&mut self.engine, container, request)
    }

    /// Forwards a container resize. Returns `true` if the container height changed.
    pub fn on_resize(&mut self) -> bool {
        let Some(container) = self.container.as_ref() else {
            return false;
        };
        self.coordinator.on_resize(&mut self.engine, container)
    }

    /// Advances timers.
    ///
    /// - If a tween is active, scrolls the container to the sampled offset and returns it.
    /// - Otherwise, runs idle debouncing and returns `None`.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let container = self.container.as_mut()?;
        let Some(tween) = self.tween else {
            self.coordinator.poll_idle(&mut self.engine, now_ms);
            return None;
        };

        let offset = self.engine.clamp_scroll_offset(tween.sample(now_ms));
        container.scroll_to(offset, ScrollBehavior::Instant);
        self.engine.set_scroll_offset(offset);
        if tween.is_done(now_ms) {
            atrace!(offset, "tween finished");
            self.tween = None;
        }
        Some(offset)
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn cancel_animation(&mut self) {
        self.tween = None;
    }

    /// Smooth-scrolls the container so that `index` is placed according to `align`.
    ///
    /// Returns the clamped target offset, or `None` (and does nothing) when the index is out of
    /// range or no container is attached.
    pub fn scroll_to_index(&mut self, index: usize, align: Align) -> Option<u64> {
        let container = self.container.as_mut()?;
        let offset = self.engine.scroll_to_index_offset(index, align)?;
        atrace!(index, offset, "scroll_to_index");
        self.tween = None;
        container.scroll_to(offset, ScrollBehavior::Smooth);
        Some(offset)
    }

    /// Starts an adapter-driven tween towards `index`; `tick` advances it.
    ///
    /// Returns the clamped target offset, with the same no-op rules as [`Self::scroll_to_index`].
    pub fn animate_to_index(
        &mut self,
        index: usize,
        align: Align,
        now_ms: u64,
        duration_ms: u64,
        easing: Easing,
    ) -> Option<u64> {
        self.container.as_ref()?;
        let to = self.engine.scroll_to_index_offset(index, align)?;
        let from = self.engine.scroll_offset();
        self.tween = Some(Tween::new(from, to, now_ms, duration_ms, easing));
        Some(to)
    }

    /// Records a measured item height (dynamic-height mode only).
    ///
    /// Returns `true` if the metrics changed. No-op while no container is attached.
    pub fn measure_item(&mut self, index: usize, height: u32) -> bool {
        if self.container.is_none() {
            return false;
        }
        let changed = self.engine.measure_item(index, height);
        if changed {
            self.sync_spacer();
        }
        changed
    }

    /// Replaces the collection size (e.g. after a data refresh).
    pub fn set_count(&mut self, count: usize) {
        self.engine.set_count(count);
        self.sync_spacer();
    }

    pub fn set_options(&mut self, options: ScrollOptions) {
        self.engine.set_options(options);
        self.sync_spacer();
    }

    pub fn is_virtual(&self) -> bool {
        self.engine.is_virtual()
    }

    pub fn is_scrolling(&self) -> bool {
        self.engine.is_scrolling()
    }

    pub fn total_height(&self) -> u64 {
        self.engine.total_height()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.engine.scroll_offset()
    }

    pub fn visible_range(&self) -> VisibleRange {
        self.engine.visible_range()
    }

    pub fn for_each_windowed_item(&self, f: impl FnMut(WindowedItem)) {
        self.engine.for_each_windowed_item(f);
    }

    pub fn windowed_items(&self) -> Vec<WindowedItem> {
        let mut out = Vec::new();
        self.engine.collect_windowed_items(&mut out);
        out
    }

    fn sync_spacer(&mut self) {
        let Some(spacer) = self.spacer.as_mut() else {
            return;
        };
        let height = self.engine.total_height();
        if self.spacer_height == Some(height) {
            return;
        }
        spacer.set_height(height);
        self.spacer_height = Some(height);
    }
}

impl<C: ScrollContainer, S: FrameScheduler> Drop for VirtualList<C, S> {
    fn drop(&mut self) {
        self.detach_container();
    }
}

impl<C: ScrollContainer + core::fmt::Debug, S: FrameScheduler + core::fmt::Debug> core::fmt::Debug
    for VirtualList<C, S>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualList")
            .field("engine", &self.engine)
            .field("coordinator", &self.coordinator)
            .field("scheduler", &self.scheduler)
            .field("container", &self.container)
            .field("spacer_height", &self.spacer_height)
            .field("tween", &self.tween)
            .finish_non_exhaustive()
    }
}
