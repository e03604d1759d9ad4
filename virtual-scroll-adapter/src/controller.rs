use alloc::vec::Vec;

use virtual_scroll::{ScrollStrategyError, VirtualScrollStrategy};

use crate::ListViewport;

/// A framework-neutral driver that owns a strategy and a [`ListViewport`] and runs the host
/// side of the event loop.
///
/// Every input (a scroll, new data, a resize) is forwarded to the strategy. If the strategy
/// changed the layout, the controller then plays the part of the host's render pass: it lays
/// out the new range, applies the content offset, and reports both back.
#[derive(Clone, Debug)]
pub struct Controller<S> {
    strategy: S,
    viewport: ListViewport,
}

impl<S: VirtualScrollStrategy> Controller<S> {
    /// Wraps `strategy` and `viewport` without attaching.
    pub fn new(strategy: S, viewport: ListViewport) -> Self {
        Self { strategy, viewport }
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn strategy_mut(&mut self) -> &mut S {
        &mut self.strategy
    }

    pub fn viewport(&self) -> &ListViewport {
        &self.viewport
    }

    pub fn into_parts(self) -> (S, ListViewport) {
        (self.strategy, self.viewport)
    }

    pub fn scroll_offset(&self) -> f64 {
        self.viewport.scroll_offset()
    }

    pub fn attach(&mut self) {
        vdebug!(len = self.viewport.len(), "Controller::attach");
        self.strategy.attach(&mut self.viewport);
        self.render_cycle();
    }

    pub fn detach(&mut self) {
        self.strategy.detach();
    }

    /// Scrolls to `offset` as a user would. Returns the applied (clamped) offset.
    ///
    /// Scrolling to the current offset produces no event.
    pub fn scroll_to(&mut self, offset: f64) -> f64 {
        let before = self.viewport.scroll_offset();
        let applied = self.viewport.set_scroll_offset(offset);
        if applied != before {
            self.dispatch(|strategy, viewport| strategy.on_content_scrolled(viewport));
        }
        applied
    }

    pub fn scroll_by(&mut self, delta: f64) -> f64 {
        self.scroll_to(self.viewport.scroll_offset() + delta)
    }

    /// Replaces the data and re-clamps the scroll offset to the new content.
    pub fn set_data(&mut self, sizes: Vec<f64>) {
        self.viewport.set_data(sizes);
        self.dispatch(|strategy, viewport| strategy.on_data_length_changed(viewport));
        let offset = self.viewport.scroll_offset();
        if self.viewport.clamp_scroll_offset(offset) != offset {
            self.scroll_to(offset);
        }
    }

    /// Resizes the visible area. Hosts treat this like a data change: everything is re-laid out.
    pub fn set_viewport_size(&mut self, viewport_size: f64) {
        self.viewport.set_viewport_size(viewport_size);
        self.dispatch(|strategy, viewport| strategy.on_data_length_changed(viewport));
    }

    /// Changes one item's true size, as if its content reflowed, and re-measures.
    pub fn resize_item(&mut self, index: usize, size: f64) {
        self.viewport.resize_item(index, size);
        self.strategy.on_content_rendered(&mut self.viewport);
    }

    /// Asks the strategy to scroll `index` into view. Returns the resulting scroll offset.
    pub fn scroll_to_index(&mut self, index: usize) -> Result<f64, ScrollStrategyError> {
        let before = self.viewport.scroll_offset();
        if let Err(err) = self.strategy.scroll_to_index(&mut self.viewport, index) {
            vwarn!(index, error = %err, "Controller::scroll_to_index failed");
            return Err(err);
        }
        if self.viewport.scroll_offset() != before {
            self.dispatch(|strategy, viewport| strategy.on_content_scrolled(viewport));
        }
        Ok(self.viewport.scroll_offset())
    }

    pub fn scrolled_index_change(&mut self) -> Result<Option<usize>, ScrollStrategyError> {
        self.strategy.scrolled_index_change()
    }

    fn dispatch(&mut self, event: impl FnOnce(&mut S, &mut ListViewport)) {
        event(&mut self.strategy, &mut self.viewport);
        if self.viewport.needs_render() {
            self.render_cycle();
        }
    }

    fn render_cycle(&mut self) {
        let offset_applied = self.viewport.render();
        self.strategy.on_content_rendered(&mut self.viewport);
        if offset_applied {
            self.strategy.on_rendered_offset_changed(&mut self.viewport);
        }
    }
}
