use crate::{ContentOffsetAnchor, Range};

/// The scrollable surface a strategy drives.
///
/// A host framework implements this for its scroll container. Queries report what is currently
/// laid out; commands ask the host to change what it renders. All pixel values share one
/// coordinate space along the scroll axis, measured from the start of the full virtual list.
pub trait Viewport {
    /// Current scroll offset from the start of the list.
    fn measure_scroll_offset(&self) -> f64;

    /// The range of items currently materialized.
    fn rendered_range(&self) -> Range;

    /// Size of the visible area along the scroll axis.
    fn viewport_size(&self) -> f64;

    /// Total number of items in the data source.
    fn data_length(&self) -> usize;

    /// Measured size of everything currently rendered.
    fn measure_rendered_content_size(&self) -> f64;

    /// Exact measured size of `range`, which must lie inside [`Viewport::rendered_range`].
    fn measure_range_size(&self, range: Range) -> f64;

    /// Offset from the start of the list to the start of the rendered content.
    fn offset_to_rendered_content_start(&self) -> f64;

    fn set_rendered_range(&mut self, range: Range);

    /// Positions the rendered window. With [`ContentOffsetAnchor::ToEnd`], `offset` is where the
    /// window's trailing edge sits and the host derives the start from the rendered size.
    fn set_rendered_content_offset(&mut self, offset: f64, anchor: ContentOffsetAnchor);

    fn set_total_content_size(&mut self, size: f64);

    /// Scrolls the host container. Only strategies that know exact item offsets use this.
    fn scroll_to_offset(&mut self, offset: f64);
}
