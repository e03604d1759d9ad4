/// Errors reported by scroll strategies.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScrollStrategyError {
    /// `max_buffer_px` was smaller than `min_buffer_px`. No state was changed.
    #[error(
        "maxBufferPx must be greater than or equal to minBufferPx (min={min_buffer_px}, max={max_buffer_px})"
    )]
    InvalidBufferSize {
        min_buffer_px: f64,
        max_buffer_px: f64,
    },

    /// An item size that is negative or not finite.
    #[error("itemSize must be a finite, non-negative number (got {item_size})")]
    InvalidItemSize { item_size: f64 },

    /// The strategy does not implement this operation at all.
    #[error("{operation} is not supported by the {strategy} scroll strategy")]
    Unsupported {
        operation: &'static str,
        strategy: &'static str,
    },
}
