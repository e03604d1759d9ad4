use crate::Range;

/// Default estimate used before any sample has been taken.
pub const DEFAULT_ITEM_SIZE: f64 = 50.0;

/// A running, weighted average of rendered item sizes.
///
/// Samples are measurements of whole ranges rather than single items, and each sample is
/// weighted by the number of items it covers. A single measurement of forty items therefore
/// moves the estimate far more than a measurement of one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemSizeAverager {
    default_item_size: f64,
    average_item_size: f64,
    total_weight: usize,
}

impl ItemSizeAverager {
    pub fn new(default_item_size: f64) -> Self {
        Self {
            default_item_size,
            average_item_size: default_item_size,
            total_weight: 0,
        }
    }

    /// The current estimate of a single item's size.
    pub fn average_item_size(&self) -> f64 {
        self.average_item_size
    }

    pub fn default_item_size(&self) -> f64 {
        self.default_item_size
    }

    /// Number of items that have contributed to the current estimate.
    pub fn total_weight(&self) -> usize {
        self.total_weight
    }

    /// Folds a measurement of `size` pixels for all items in `range` into the estimate.
    ///
    /// Empty ranges are ignored, as is any sample that would collapse the estimate to zero or
    /// NaN.
    pub fn add_sample(&mut self, range: Range, size: f64) {
        if range.is_empty() {
            return;
        }
        let new_total_weight = self.total_weight.saturating_add(range.len());
        let new_average_item_size = (size
            + self.average_item_size * self.total_weight as f64)
            / new_total_weight as f64;
        if new_average_item_size == 0.0 || new_average_item_size.is_nan() {
            vdebug!(size, range_len = range.len(), "ItemSizeAverager: rejected sample");
            return;
        }
        self.average_item_size = new_average_item_size;
        self.total_weight = new_total_weight;
    }

    /// Forgets every sample and goes back to the default estimate.
    pub fn reset(&mut self) {
        self.average_item_size = self.default_item_size;
        self.total_weight = 0;
    }
}

impl Default for ItemSizeAverager {
    fn default() -> Self {
        Self::new(DEFAULT_ITEM_SIZE)
    }
}
