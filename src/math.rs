//! Float rounding that works with and without `std`.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("virtual-scroll requires either the `std` or the `libm` feature");

#[cfg(feature = "std")]
pub(crate) fn floor(x: f64) -> f64 {
    x.floor()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn floor(x: f64) -> f64 {
    libm::floor(x)
}

#[cfg(feature = "std")]
pub(crate) fn ceil(x: f64) -> f64 {
    x.ceil()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn ceil(x: f64) -> f64 {
    libm::ceil(x)
}

#[cfg(feature = "std")]
pub(crate) fn round(x: f64) -> f64 {
    x.round()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn round(x: f64) -> f64 {
    libm::round(x)
}

#[cfg(feature = "std")]
pub(crate) fn abs(x: f64) -> f64 {
    x.abs()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

/// Converts a non-negative item count computed in pixels-space to an index.
///
/// Negative and NaN inputs map to `0`; values past `usize::MAX` saturate.
pub(crate) fn to_count(x: f64) -> usize {
    if x.is_nan() || x <= 0.0 {
        0
    } else {
        x as usize
    }
}
