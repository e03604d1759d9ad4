use crate::{ScrollStrategyError, Viewport};

/// Decides which items a [`Viewport`] renders as it scrolls.
///
/// The host calls `attach` once it has a viewport, forwards its events through the `on_*`
/// methods, and calls `detach` when the viewport goes away. The viewport is lent on every call;
/// a detached strategy ignores events and never touches the viewport it is handed.
pub trait VirtualScrollStrategy {
    /// Starts driving `viewport`. Calling it again with another viewport starts over.
    fn attach(&mut self, viewport: &mut dyn Viewport);

    /// Stops driving the viewport. A no-op when already detached.
    fn detach(&mut self);

    fn is_attached(&self) -> bool;

    /// The user scrolled the viewport.
    fn on_content_scrolled(&mut self, viewport: &mut dyn Viewport);

    /// The number of items in the data source changed.
    fn on_data_length_changed(&mut self, viewport: &mut dyn Viewport);

    /// The viewport finished rendering the range it was last given.
    fn on_content_rendered(&mut self, viewport: &mut dyn Viewport);

    /// The offset of the rendered content changed for reasons outside the strategy.
    fn on_rendered_offset_changed(&mut self, viewport: &mut dyn Viewport);

    /// Scrolls `index` to the start of the viewport.
    fn scroll_to_index(
        &mut self,
        viewport: &mut dyn Viewport,
        index: usize,
    ) -> Result<(), ScrollStrategyError>;

    /// Polls the index of the first visible item.
    ///
    /// Returns `Ok(Some(index))` only when it changed since the previous poll.
    fn scrolled_index_change(&mut self) -> Result<Option<usize>, ScrollStrategyError>;
}
