use crate::autosize::{DEFAULT_MAX_BUFFER_PX, DEFAULT_MIN_BUFFER_PX};
use crate::math::{ceil, floor, to_count};
use crate::{ContentOffsetAnchor, Range, ScrollStrategyError, Viewport, VirtualScrollStrategy};

/// Default `item_size`.
pub const DEFAULT_FIXED_ITEM_SIZE: f64 = 20.0;

/// A scroll strategy for lists where every item has the same size.
///
/// Because every offset is known exactly, this strategy can also scroll to an index and report
/// the first visible index.
#[derive(Clone, Debug)]
pub struct FixedSizeVirtualScrollStrategy {
    attached: bool,
    item_size: f64,
    min_buffer_px: f64,
    max_buffer_px: f64,
    scrolled_index: Option<usize>,
    reported_index: Option<usize>,
}

impl FixedSizeVirtualScrollStrategy {
    /// Creates a detached strategy after validating the sizes.
    pub fn new(
        item_size: f64,
        min_buffer_px: f64,
        max_buffer_px: f64,
    ) -> Result<Self, ScrollStrategyError> {
        validate(item_size, min_buffer_px, max_buffer_px)?;
        Ok(Self {
            attached: false,
            item_size,
            min_buffer_px,
            max_buffer_px,
            scrolled_index: None,
            reported_index: None,
        })
    }

    pub fn item_size(&self) -> f64 {
        self.item_size
    }

    pub fn min_buffer_px(&self) -> f64 {
        self.min_buffer_px
    }

    pub fn max_buffer_px(&self) -> f64 {
        self.max_buffer_px
    }

    /// Replaces the item and buffer sizes, or changes nothing if they are invalid.
    ///
    /// When attached, the total size and rendered range are recomputed immediately.
    pub fn update_item_and_buffer_size(
        &mut self,
        viewport: &mut dyn Viewport,
        item_size: f64,
        min_buffer_px: f64,
        max_buffer_px: f64,
    ) -> Result<(), ScrollStrategyError> {
        validate(item_size, min_buffer_px, max_buffer_px)?;
        vdebug!(item_size, min_buffer_px, max_buffer_px, "update_item_and_buffer_size");
        self.item_size = item_size;
        self.min_buffer_px = min_buffer_px;
        self.max_buffer_px = max_buffer_px;
        if self.attached {
            self.update_total_content_size(viewport);
            self.update_rendered_range(viewport);
        }
        Ok(())
    }

    fn update_total_content_size(&self, viewport: &mut dyn Viewport) {
        viewport.set_total_content_size(viewport.data_length() as f64 * self.item_size);
    }

    fn update_rendered_range(&mut self, viewport: &mut dyn Viewport) {
        let item_size = self.item_size;
        let rendered_range = viewport.rendered_range();
        let mut range = rendered_range;
        let viewport_size = viewport.viewport_size();
        let data_length = viewport.data_length();
        let mut scroll_offset = viewport.measure_scroll_offset();
        // Fractional: the first item may be partly scrolled out.
        let mut first_visible_index = if item_size > 0.0 {
            scroll_offset / item_size
        } else {
            0.0
        };

        // The data shrank underneath the rendered range: show as full a page as the data allows.
        if range.end > data_length {
            let max_visible_items = to_count(ceil(viewport_size / item_size));
            let last_page_start = data_length.saturating_sub(max_visible_items) as f64;
            let new_visible_index = first_visible_index.min(last_page_start).max(0.0);
            if first_visible_index != new_visible_index {
                first_visible_index = new_visible_index;
                scroll_offset = new_visible_index * item_size;
                range.start = to_count(floor(first_visible_index));
            }
            range.end = data_length.min(range.start.saturating_add(max_visible_items));
        }

        let start_buffer = scroll_offset - range.start as f64 * item_size;
        if start_buffer < self.min_buffer_px && range.start != 0 {
            let expand_start = to_count(ceil((self.max_buffer_px - start_buffer) / item_size));
            range.start = range.start.saturating_sub(expand_start);
            range.end = data_length.min(to_count(ceil(
                first_visible_index + (viewport_size + self.min_buffer_px) / item_size,
            )));
        } else {
            let end_buffer = range.end as f64 * item_size - (scroll_offset + viewport_size);
            if end_buffer < self.min_buffer_px && range.end != data_length {
                let expand_end = to_count(ceil((self.max_buffer_px - end_buffer) / item_size));
                if expand_end > 0 {
                    range.end = data_length.min(range.end.saturating_add(expand_end));
                    range.start = to_count(floor(
                        first_visible_index - self.min_buffer_px / item_size,
                    ));
                }
            }
        }

        let range = Range::new(range.start.min(range.end), range.end).clamp_to(data_length);
        vtrace!(
            scroll_offset,
            start = range.start,
            end = range.end,
            "fixed render"
        );
        viewport.set_rendered_range(range);
        viewport.set_rendered_content_offset(
            item_size * range.start as f64,
            ContentOffsetAnchor::ToStart,
        );
        self.scrolled_index = Some(to_count(floor(first_visible_index)));
    }
}

impl Default for FixedSizeVirtualScrollStrategy {
    fn default() -> Self {
        Self {
            attached: false,
            item_size: DEFAULT_FIXED_ITEM_SIZE,
            min_buffer_px: DEFAULT_MIN_BUFFER_PX,
            max_buffer_px: DEFAULT_MAX_BUFFER_PX,
            scrolled_index: None,
            reported_index: None,
        }
    }
}

impl VirtualScrollStrategy for FixedSizeVirtualScrollStrategy {
    fn attach(&mut self, viewport: &mut dyn Viewport) {
        vdebug!(data_length = viewport.data_length(), "fixed attach");
        self.attached = true;
        self.update_total_content_size(viewport);
        self.update_rendered_range(viewport);
    }

    fn detach(&mut self) {
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn on_content_scrolled(&mut self, viewport: &mut dyn Viewport) {
        if !self.attached {
            return;
        }
        self.update_rendered_range(viewport);
    }

    fn on_data_length_changed(&mut self, viewport: &mut dyn Viewport) {
        if !self.attached {
            return;
        }
        self.update_total_content_size(viewport);
        self.update_rendered_range(viewport);
    }

    fn on_content_rendered(&mut self, _viewport: &mut dyn Viewport) {}

    fn on_rendered_offset_changed(&mut self, _viewport: &mut dyn Viewport) {}

    fn scroll_to_index(
        &mut self,
        viewport: &mut dyn Viewport,
        index: usize,
    ) -> Result<(), ScrollStrategyError> {
        if self.attached {
            viewport.scroll_to_offset(index as f64 * self.item_size);
        }
        Ok(())
    }

    fn scrolled_index_change(&mut self) -> Result<Option<usize>, ScrollStrategyError> {
        if self.scrolled_index == self.reported_index {
            return Ok(None);
        }
        self.reported_index = self.scrolled_index;
        Ok(self.scrolled_index)
    }
}

fn validate(item_size: f64, min_buffer_px: f64, max_buffer_px: f64) -> Result<(), ScrollStrategyError> {
    if !item_size.is_finite() || item_size < 0.0 {
        return Err(ScrollStrategyError::InvalidItemSize { item_size });
    }
    if max_buffer_px < min_buffer_px {
        vwarn!(min_buffer_px, max_buffer_px, "fixed: rejected buffer size");
        return Err(ScrollStrategyError::InvalidBufferSize {
            min_buffer_px,
            max_buffer_px,
        });
    }
    Ok(())
}
