use crate::math::{abs, ceil, floor, round, to_count};
use crate::{
    ContentOffsetAnchor, ItemSizeAverager, Range, ScrollStrategyError, Viewport,
    VirtualScrollStrategy,
};

/// Default `min_buffer_px`.
pub const DEFAULT_MIN_BUFFER_PX: f64 = 100.0;
/// Default `max_buffer_px`.
pub const DEFAULT_MAX_BUFFER_PX: f64 = 200.0;

/// A scroll strategy for items whose sizes are unknown until they are rendered.
///
/// Item sizes are estimated with an [`ItemSizeAverager`] that learns from every rendered
/// window. On each scroll the strategy renders just enough new items on the side being
/// approached to keep between `min_buffer_px` and `max_buffer_px` of content beyond the
/// viewport edge, and drops items on the opposite side when it can prove (by measuring them)
/// that doing so cannot expose empty space.
///
/// Estimation error accumulates in the offset of the rendered window. When scrolling toward the
/// start, that error is bled off a little at a time, in proportion to how far toward the start
/// each scroll moved, so it reaches zero exactly at the first item without a visible jump.
///
/// Programmatic scrolling to an index is not supported: without item sizes there is no way to
/// know where an index lives.
#[derive(Clone, Debug)]
pub struct AutoSizeVirtualScrollStrategy {
    attached: bool,
    min_buffer_px: f64,
    max_buffer_px: f64,
    averager: ItemSizeAverager,

    last_scroll_offset: f64,
    last_rendered_content_offset: f64,
    last_rendered_content_size: f64,

    /// Consecutive cycles where the planned removal turned out to be too large.
    removal_failures: u32,
}

impl AutoSizeVirtualScrollStrategy {
    /// Creates a detached strategy using the default item-size estimate.
    ///
    /// Buffer sizes are not validated here; see [`Self::update_buffer_size`].
    pub fn new(min_buffer_px: f64, max_buffer_px: f64) -> Self {
        Self::with_averager(min_buffer_px, max_buffer_px, ItemSizeAverager::default())
    }

    /// Creates a detached strategy that estimates with `averager`, e.g. one with another default
    /// item size. The averager is reset on every attach.
    pub fn with_averager(min_buffer_px: f64, max_buffer_px: f64, averager: ItemSizeAverager) -> Self {
        Self {
            attached: false,
            min_buffer_px,
            max_buffer_px,
            averager,
            last_scroll_offset: 0.0,
            last_rendered_content_offset: 0.0,
            last_rendered_content_size: 0.0,
            removal_failures: 0,
        }
    }

    /// Buffer below which more items are rendered.
    pub fn min_buffer_px(&self) -> f64 {
        self.min_buffer_px
    }

    /// Buffer to fill up to once rendering is triggered.
    pub fn max_buffer_px(&self) -> f64 {
        self.max_buffer_px
    }

    /// The size estimator fed by every rendered window.
    pub fn averager(&self) -> &ItemSizeAverager {
        &self.averager
    }

    /// Current estimate of a single item's size.
    pub fn average_item_size(&self) -> f64 {
        self.averager.average_item_size()
    }

    /// Consecutive scroll cycles whose planned removal had to be abandoned.
    pub fn removal_failures(&self) -> u32 {
        self.removal_failures
    }

    /// Updates both buffer bounds, or neither if `max_buffer_px < min_buffer_px`.
    pub fn update_buffer_size(
        &mut self,
        min_buffer_px: f64,
        max_buffer_px: f64,
    ) -> Result<(), ScrollStrategyError> {
        if max_buffer_px < min_buffer_px {
            vwarn!(min_buffer_px, max_buffer_px, "update_buffer_size: rejected");
            return Err(ScrollStrategyError::InvalidBufferSize {
                min_buffer_px,
                max_buffer_px,
            });
        }
        vdebug!(min_buffer_px, max_buffer_px, "update_buffer_size");
        self.min_buffer_px = min_buffer_px;
        self.max_buffer_px = max_buffer_px;
        Ok(())
    }

    fn update_rendered_content_after_scroll(&mut self, viewport: &mut dyn Viewport) {
        let scroll_offset = viewport.measure_scroll_offset();
        let mut scroll_delta = scroll_offset - self.last_scroll_offset;
        let mut scroll_magnitude = abs(scroll_delta);
        let rendered_range = viewport.rendered_range();
        let average = self.averager.average_item_size();

        let mut offset_correction = 0.0;
        if scroll_delta < 0.0 {
            // Where the rendered content would start if every item before it had the average
            // size. The gap between that and the real offset has to be closed by the time the
            // user reaches the top, so close the share of it this scroll covered.
            let predicted_offset = rendered_range.start as f64 * average;
            let offset_difference = predicted_offset - self.last_rendered_content_offset;
            let progress = unit_fraction(scroll_magnitude / (scroll_offset + scroll_magnitude));
            offset_correction = round(offset_difference * progress);

            // Pretend the user scrolled slightly more or less than they did.
            scroll_delta -= offset_correction;
            scroll_magnitude = abs(scroll_delta);
        }

        let toward_start = scroll_delta < 0.0;
        let toward_end = scroll_delta > 0.0;
        let viewport_size = viewport.viewport_size();

        let start_buffer = self.last_scroll_offset - self.last_rendered_content_offset;
        let end_buffer = (self.last_rendered_content_offset + self.last_rendered_content_size)
            - (self.last_scroll_offset + viewport_size);
        let underscan = scroll_magnitude + self.min_buffer_px
            - (if toward_start { start_buffer } else { end_buffer });

        if underscan > 0.0 {
            if scroll_magnitude >= viewport_size {
                // The whole viewport is new content either way; a jump is not noticeable.
                self.render_content_for_current_offset(viewport);
            } else {
                // Fill up to `max_buffer_px` rather than just the deficit, to leave slack for
                // estimation error.
                let add_items = to_count(ceil(
                    (underscan - self.min_buffer_px + self.max_buffer_px) / average,
                ));
                let overscan = (if toward_start { end_buffer } else { start_buffer })
                    - self.min_buffer_px
                    + scroll_magnitude;
                let unbounded_remove_items =
                    floor(overscan / average / f64::from(self.removal_failures.saturating_add(1)));
                let remove_items = rendered_range.len().min(to_count(unbounded_remove_items));

                let data_length = viewport.data_length();
                let mut range = expand_range(
                    rendered_range,
                    if toward_start { add_items } else { 0 },
                    if toward_end { add_items } else { 0 },
                    data_length,
                );

                let (content_offset, anchor) = if toward_start {
                    if !range.is_empty() {
                        range.end = range.end.saturating_sub(remove_items).max(range.start + 1);
                    }
                    let removed = Range::new(range.end, rendered_range.end.max(range.end));
                    let removed_size = viewport.measure_range_size(removed);
                    let offset = if removed_size <= overscan {
                        self.removal_failures = 0;
                        self.last_rendered_content_offset + self.last_rendered_content_size
                            - removed_size
                    } else {
                        // Measured more than the buffer can spare: keep everything and be more
                        // conservative next cycle.
                        range.end = rendered_range.end;
                        self.removal_failures = self.removal_failures.saturating_add(1);
                        vdebug!(
                            removed_size,
                            overscan,
                            removal_failures = self.removal_failures,
                            "removal exceeded overscan"
                        );
                        self.last_rendered_content_offset + self.last_rendered_content_size
                    };
                    (offset, ContentOffsetAnchor::ToEnd)
                } else {
                    if !range.is_empty() {
                        range.start = (range.start + remove_items).min(range.end - 1);
                    }
                    let removed = Range::new(rendered_range.start, range.start.max(rendered_range.start));
                    let removed_size = viewport.measure_range_size(removed);
                    let offset = if removed_size <= overscan {
                        self.removal_failures = 0;
                        self.last_rendered_content_offset + removed_size
                    } else {
                        range.start = rendered_range.start;
                        self.removal_failures = self.removal_failures.saturating_add(1);
                        vdebug!(
                            removed_size,
                            overscan,
                            removal_failures = self.removal_failures,
                            "removal exceeded overscan"
                        );
                        self.last_rendered_content_offset
                    };
                    (offset, ContentOffsetAnchor::ToStart)
                };

                let range = range.clamp_to(data_length);
                vtrace!(
                    scroll_offset,
                    scroll_delta,
                    underscan,
                    overscan,
                    add_items,
                    remove_items,
                    start = range.start,
                    end = range.end,
                    "incremental render"
                );
                viewport.set_rendered_range(range);
                viewport.set_rendered_content_offset(content_offset + offset_correction, anchor);
            }
        } else if offset_correction != 0.0 {
            // Nothing new to render, but the window still has to drift toward its true offset.
            viewport.set_rendered_content_offset(
                self.last_rendered_content_offset + offset_correction,
                ContentOffsetAnchor::ToStart,
            );
        }

        self.last_scroll_offset = scroll_offset;
    }

    /// Discards the incremental state and renders around the estimated position of the
    /// current scroll offset.
    fn render_content_for_current_offset(&mut self, viewport: &mut dyn Viewport) {
        let scroll_offset = viewport.measure_scroll_offset();
        self.last_scroll_offset = scroll_offset;
        self.removal_failures = 0;

        let item_size = self.averager.average_item_size();
        let data_length = viewport.data_length();
        let first_visible_index =
            to_count(floor(scroll_offset / item_size)).min(data_length.saturating_sub(1));
        let buffer_size = to_count(ceil(self.max_buffer_px / item_size));
        let visible = visible_range_for_index(
            first_visible_index,
            viewport.viewport_size(),
            item_size,
            data_length,
        );
        let range = expand_range(visible, buffer_size, buffer_size, data_length);
        let content_offset = item_size * range.start as f64;

        vdebug!(
            scroll_offset,
            item_size,
            start = range.start,
            end = range.end,
            content_offset,
            "full render"
        );
        viewport.set_rendered_range(range);
        viewport.set_rendered_content_offset(content_offset, ContentOffsetAnchor::ToStart);
    }

    fn check_rendered_content_size(&mut self, viewport: &mut dyn Viewport) {
        self.last_rendered_content_size = viewport.measure_rendered_content_size();
        let rendered_range = viewport.rendered_range();
        self.averager
            .add_sample(rendered_range, self.last_rendered_content_size);

        let unrendered = viewport.data_length().saturating_sub(rendered_range.len());
        let total_size = self.last_rendered_content_size
            + unrendered as f64 * self.averager.average_item_size();
        viewport.set_total_content_size(total_size);
    }
}

impl Default for AutoSizeVirtualScrollStrategy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_BUFFER_PX, DEFAULT_MAX_BUFFER_PX)
    }
}

impl VirtualScrollStrategy for AutoSizeVirtualScrollStrategy {
    fn attach(&mut self, viewport: &mut dyn Viewport) {
        vdebug!(
            data_length = viewport.data_length(),
            viewport_size = viewport.viewport_size(),
            "autosize attach"
        );
        self.averager.reset();
        self.attached = true;
        self.last_rendered_content_offset = 0.0;
        self.last_rendered_content_size = 0.0;
        self.render_content_for_current_offset(viewport);
    }

    fn detach(&mut self) {
        if self.attached {
            vdebug!("autosize detach");
        }
        self.attached = false;
    }

    fn is_attached(&self) -> bool {
        self.attached
    }

    fn on_content_scrolled(&mut self, viewport: &mut dyn Viewport) {
        if !self.attached {
            return;
        }
        self.update_rendered_content_after_scroll(viewport);
    }

    fn on_data_length_changed(&mut self, viewport: &mut dyn Viewport) {
        if !self.attached {
            return;
        }
        vdebug!(data_length = viewport.data_length(), "autosize data length changed");
        self.render_content_for_current_offset(viewport);
        self.check_rendered_content_size(viewport);
    }

    fn on_content_rendered(&mut self, viewport: &mut dyn Viewport) {
        if !self.attached {
            return;
        }
        self.check_rendered_content_size(viewport);
    }

    fn on_rendered_offset_changed(&mut self, viewport: &mut dyn Viewport) {
        if !self.attached {
            return;
        }
        self.last_rendered_content_offset = viewport.offset_to_rendered_content_start();
    }

    fn scroll_to_index(
        &mut self,
        _viewport: &mut dyn Viewport,
        _index: usize,
    ) -> Result<(), ScrollStrategyError> {
        vwarn!("scroll_to_index is not supported by the autosize strategy");
        Err(ScrollStrategyError::Unsupported {
            operation: "scroll_to_index",
            strategy: "autosize",
        })
    }

    fn scrolled_index_change(&mut self) -> Result<Option<usize>, ScrollStrategyError> {
        vwarn!("scrolled_index_change is not supported by the autosize strategy");
        Err(ScrollStrategyError::Unsupported {
            operation: "scrolled_index_change",
            strategy: "autosize",
        })
    }
}

/// The items that fit in the viewport starting at `start_index`, pulled back if that would run
/// past the end of the data.
fn visible_range_for_index(
    start_index: usize,
    viewport_size: f64,
    item_size: f64,
    data_length: usize,
) -> Range {
    let end = start_index.saturating_add(to_count(ceil(viewport_size / item_size)));
    let extra = end.saturating_sub(data_length);
    Range::new(start_index.saturating_sub(extra), end)
}

fn expand_range(range: Range, expand_start: usize, expand_end: usize, data_length: usize) -> Range {
    let end = range.end.saturating_add(expand_end).min(data_length);
    let start = range.start.saturating_sub(expand_start).min(end);
    Range::new(start, end)
}

/// Clamps into `[0, 1]`, treating NaN as no progress.
fn unit_fraction(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}
