use alloc::vec::Vec;

use virtual_scroll::{ContentOffsetAnchor, Range, Viewport};

use crate::fenwick::Fenwick;

/// A command a strategy issued to a [`ListViewport`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewportCommand {
    SetRenderedRange(Range),
    SetRenderedContentOffset {
        offset: f64,
        anchor: ContentOffsetAnchor,
    },
    SetTotalContentSize(f64),
    ScrollToOffset(f64),
}

/// An in-memory scroll container over items with known, true sizes.
///
/// It behaves like a host viewport that lays items out one after another: it measures exactly,
/// applies range and offset commands, and clamps scrolling to the content size the strategy
/// last reported. Strategies only ever see what a real host would let them measure.
///
/// Offset commands take effect on [`ListViewport::render`], after the new range is laid out,
/// because an end-anchored offset needs the rendered size.
///
/// Only a count of commands is kept by default. [`ListViewport::with_command_log`] also records
/// each one, which is meant for tests and short simulations.
#[derive(Clone, Debug)]
pub struct ListViewport {
    sizes: Vec<f64>,
    sums: Fenwick,
    viewport_size: f64,
    scroll_offset: f64,

    rendered_range: Range,
    rendered_content_offset: f64,
    pending_offset: Option<(f64, ContentOffsetAnchor)>,
    total_content_size: f64,

    needs_render: bool,
    commands_issued: u64,
    command_log: Option<Vec<ViewportCommand>>,
}

impl ListViewport {
    pub fn new(sizes: Vec<f64>, viewport_size: f64) -> Self {
        let sums = Fenwick::from_sizes(&sizes);
        Self {
            sizes,
            sums,
            viewport_size: viewport_size.max(0.0),
            scroll_offset: 0.0,
            rendered_range: Range::default(),
            rendered_content_offset: 0.0,
            pending_offset: None,
            total_content_size: 0.0,
            needs_render: false,
            commands_issued: 0,
            command_log: None,
        }
    }

    /// Records every command from now on; see [`ListViewport::commands`].
    pub fn with_command_log(mut self) -> Self {
        self.command_log.get_or_insert_with(Vec::new);
        self
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    /// Scrolls to `offset`, clamped to the scrollable extent. Returns the applied offset.
    pub fn set_scroll_offset(&mut self, offset: f64) -> f64 {
        self.scroll_offset = self.clamp_scroll_offset(offset);
        self.scroll_offset
    }

    pub fn max_scroll_offset(&self) -> f64 {
        (self.total_content_size - self.viewport_size).max(0.0)
    }

    pub fn clamp_scroll_offset(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_scroll_offset())
    }

    pub fn set_viewport_size(&mut self, viewport_size: f64) {
        self.viewport_size = viewport_size.max(0.0);
    }

    /// Replaces every item. The caller should then notify the strategy of the new length.
    pub fn set_data(&mut self, sizes: Vec<f64>) {
        vdebug!(len = sizes.len(), "ListViewport::set_data");
        self.sums = Fenwick::from_sizes(&sizes);
        self.sizes = sizes;
    }

    /// Changes the true size of one item, e.g. after its content reflowed.
    pub fn resize_item(&mut self, index: usize, size: f64) {
        let Some(slot) = self.sizes.get_mut(index) else {
            return;
        };
        let delta = size - *slot;
        *slot = size;
        self.sums.add(index, delta);
    }

    pub fn item_size(&self, index: usize) -> Option<f64> {
        self.sizes.get(index).copied()
    }

    /// Where item `index` really starts, if every item were laid out.
    pub fn item_start(&self, index: usize) -> Option<f64> {
        (index < self.len()).then(|| self.sums.prefix_sum(index))
    }

    /// The true total size of all items.
    pub fn true_total_size(&self) -> f64 {
        self.sums.total()
    }

    /// The content size the strategy last reported; this bounds scrolling.
    pub fn total_content_size(&self) -> f64 {
        self.total_content_size
    }

    pub fn rendered_content_offset(&self) -> f64 {
        self.rendered_content_offset
    }

    /// Pixel span the rendered items currently occupy.
    pub fn rendered_span(&self) -> (f64, f64) {
        let start = self.rendered_content_offset;
        (start, start + self.sums_for(self.rendered_range))
    }

    /// Returns `true` if the rendered items fill the visible area.
    ///
    /// Past the last item there is nothing to render, so a window that reaches the end of the
    /// data only has to cover up to its own trailing edge.
    pub fn covers_viewport(&self) -> bool {
        const EPSILON: f64 = 1e-6;
        if self.is_empty() {
            return true;
        }
        let (start, end) = self.rendered_span();
        let mut visible_end = self.scroll_offset + self.viewport_size;
        if self.rendered_range.end >= self.len() {
            visible_end = visible_end.min(end);
        }
        start <= self.scroll_offset + EPSILON && end + EPSILON >= visible_end
    }

    /// Recorded commands, oldest first. Empty unless the log was enabled.
    pub fn commands(&self) -> &[ViewportCommand] {
        self.command_log.as_deref().unwrap_or(&[])
    }

    pub fn clear_commands(&mut self) {
        if let Some(log) = &mut self.command_log {
            log.clear();
        }
    }

    /// Number of commands received over the viewport's lifetime, logged or not.
    pub fn commands_issued(&self) -> u64 {
        self.commands_issued
    }

    /// Returns `true` if a range, offset, or size command arrived since the last render.
    pub fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Lays out the current range and applies any pending content offset.
    ///
    /// Returns `true` if a content offset was applied, even one equal to the previous offset.
    pub fn render(&mut self) -> bool {
        self.needs_render = false;
        let Some((offset, anchor)) = self.pending_offset.take() else {
            return false;
        };
        let start = match anchor {
            ContentOffsetAnchor::ToStart => offset,
            ContentOffsetAnchor::ToEnd => offset - self.sums_for(self.rendered_range),
        };
        vtrace!(start, previous = self.rendered_content_offset, "ListViewport::render");
        self.rendered_content_offset = start;
        true
    }

    /// Index of the item under `offset`, by true sizes. `None` when there are no items.
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some(self.sums.lower_bound(offset.max(0.0)).min(self.len() - 1))
    }

    /// Items that intersect the visible area if every item sat at its true position.
    pub fn visible_range(&self) -> Range {
        let Some(first) = self.index_at_offset(self.scroll_offset) else {
            return Range::default();
        };
        let end_offset = self.scroll_offset + self.viewport_size;
        let mut end = first + 1;
        while end < self.len() && self.sums.prefix_sum(end) < end_offset {
            end += 1;
        }
        Range::new(first, end)
    }

    fn record(&mut self, command: ViewportCommand) {
        self.commands_issued = self.commands_issued.saturating_add(1);
        // Scrolling is not a layout change.
        if !matches!(command, ViewportCommand::ScrollToOffset(_)) {
            self.needs_render = true;
        }
        if let Some(log) = &mut self.command_log {
            log.push(command);
        }
    }

    fn sums_for(&self, range: Range) -> f64 {
        let range = range.clamp_to(self.len());
        self.sums.prefix_sum(range.end) - self.sums.prefix_sum(range.start)
    }
}

impl Viewport for ListViewport {
    fn measure_scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    fn rendered_range(&self) -> Range {
        self.rendered_range
    }

    fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    fn data_length(&self) -> usize {
        self.len()
    }

    fn measure_rendered_content_size(&self) -> f64 {
        self.sums_for(self.rendered_range)
    }

    fn measure_range_size(&self, range: Range) -> f64 {
        self.sums_for(range)
    }

    fn offset_to_rendered_content_start(&self) -> f64 {
        self.rendered_content_offset
    }

    fn set_rendered_range(&mut self, range: Range) {
        self.record(ViewportCommand::SetRenderedRange(range));
        self.rendered_range = range.clamp_to(self.len());
    }

    fn set_rendered_content_offset(&mut self, offset: f64, anchor: ContentOffsetAnchor) {
        self.record(ViewportCommand::SetRenderedContentOffset { offset, anchor });
        self.pending_offset = Some((offset, anchor));
    }

    fn set_total_content_size(&mut self, size: f64) {
        self.record(ViewportCommand::SetTotalContentSize(size));
        self.total_content_size = size;
    }

    fn scroll_to_offset(&mut self, offset: f64) {
        self.record(ViewportCommand::ScrollToOffset(offset));
        self.set_scroll_offset(offset);
    }
}
