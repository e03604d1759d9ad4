use crate::autosize::{DEFAULT_MAX_BUFFER_PX, DEFAULT_MIN_BUFFER_PX};
use crate::fixed::DEFAULT_FIXED_ITEM_SIZE;
use crate::{AutoSizeVirtualScrollStrategy, FixedSizeVirtualScrollStrategy, ScrollStrategyError};

/// Inputs a host exposes for the auto-size strategy.
///
/// With `feature = "serde"`, missing fields deserialize to their defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AutoSizeConfig {
    /// Minimum buffer kept beyond the viewport before more items are rendered.
    pub min_buffer_px: f64,
    /// How much buffer to render up to once rendering is triggered.
    pub max_buffer_px: f64,
}

impl Default for AutoSizeConfig {
    fn default() -> Self {
        Self {
            min_buffer_px: DEFAULT_MIN_BUFFER_PX,
            max_buffer_px: DEFAULT_MAX_BUFFER_PX,
        }
    }
}

impl AutoSizeConfig {
    pub fn with_min_buffer_px(mut self, min_buffer_px: f64) -> Self {
        self.min_buffer_px = min_buffer_px;
        self
    }

    pub fn with_max_buffer_px(mut self, max_buffer_px: f64) -> Self {
        self.max_buffer_px = max_buffer_px;
        self
    }

    /// Sets `min_buffer_px` from textual input; anything that is not a number becomes `0`.
    pub fn set_min_buffer_px_input(&mut self, input: &str) {
        self.min_buffer_px = coerce_number(input, 0.0);
    }

    /// Sets `max_buffer_px` from textual input; anything that is not a number becomes `0`.
    pub fn set_max_buffer_px_input(&mut self, input: &str) {
        self.max_buffer_px = coerce_number(input, 0.0);
    }

    pub fn validate(&self) -> Result<(), ScrollStrategyError> {
        if self.max_buffer_px < self.min_buffer_px {
            return Err(ScrollStrategyError::InvalidBufferSize {
                min_buffer_px: self.min_buffer_px,
                max_buffer_px: self.max_buffer_px,
            });
        }
        Ok(())
    }

    /// Creates a detached strategy with these buffer sizes.
    pub fn build(&self) -> Result<AutoSizeVirtualScrollStrategy, ScrollStrategyError> {
        self.validate()?;
        Ok(AutoSizeVirtualScrollStrategy::new(
            self.min_buffer_px,
            self.max_buffer_px,
        ))
    }

    /// Pushes these buffer sizes into an existing strategy, e.g. after an input changed.
    pub fn apply(
        &self,
        strategy: &mut AutoSizeVirtualScrollStrategy,
    ) -> Result<(), ScrollStrategyError> {
        strategy.update_buffer_size(self.min_buffer_px, self.max_buffer_px)
    }
}

/// Inputs a host exposes for the fixed-size strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FixedSizeConfig {
    pub item_size: f64,
    pub min_buffer_px: f64,
    pub max_buffer_px: f64,
}

impl Default for FixedSizeConfig {
    fn default() -> Self {
        Self {
            item_size: DEFAULT_FIXED_ITEM_SIZE,
            min_buffer_px: DEFAULT_MIN_BUFFER_PX,
            max_buffer_px: DEFAULT_MAX_BUFFER_PX,
        }
    }
}

impl FixedSizeConfig {
    pub fn with_item_size(mut self, item_size: f64) -> Self {
        self.item_size = item_size;
        self
    }

    pub fn with_buffer_px(mut self, min_buffer_px: f64, max_buffer_px: f64) -> Self {
        self.min_buffer_px = min_buffer_px;
        self.max_buffer_px = max_buffer_px;
        self
    }

    pub fn set_item_size_input(&mut self, input: &str) {
        self.item_size = coerce_number(input, 0.0);
    }

    pub fn set_min_buffer_px_input(&mut self, input: &str) {
        self.min_buffer_px = coerce_number(input, 0.0);
    }

    pub fn set_max_buffer_px_input(&mut self, input: &str) {
        self.max_buffer_px = coerce_number(input, 0.0);
    }

    pub fn build(&self) -> Result<FixedSizeVirtualScrollStrategy, ScrollStrategyError> {
        FixedSizeVirtualScrollStrategy::new(self.item_size, self.min_buffer_px, self.max_buffer_px)
    }
}

/// Parses `input` as a number, surrounding whitespace allowed; `fallback` otherwise.
pub fn coerce_number(input: &str, fallback: f64) -> f64 {
    match input.trim().parse::<f64>() {
        Ok(value) if !value.is_nan() => value,
        _ => fallback,
    }
}
