//! Headless virtual-scroll strategies.
//!
//! A virtual-scroll viewport only materializes the items near what the user can see. This crate
//! decides *which* items those are, given nothing but what the viewport can measure, and tells
//! the viewport what to render and where to put it. It never touches pixels or a DOM.
//!
//! Two strategies implement [`VirtualScrollStrategy`]:
//! - [`AutoSizeVirtualScrollStrategy`]: items of unknown, varying size. Sizes are estimated
//!   with an [`ItemSizeAverager`] fed by every render, and the rendered window grows and shrinks
//!   incrementally as the user scrolls.
//! - [`FixedSizeVirtualScrollStrategy`]: every item has the same, known size.
//!
//! A host framework implements [`Viewport`] for its scroll container and forwards scroll,
//! render, and data-change events to the strategy. For an in-memory viewport and an
//! event-loop driver, see the `virtual-scroll-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod autosize;
mod averager;
mod config;
mod error;
mod fixed;
mod math;
mod strategy;
mod types;
mod viewport;


pub use autosize::{AutoSizeVirtualScrollStrategy, DEFAULT_MAX_BUFFER_PX, DEFAULT_MIN_BUFFER_PX};
pub use averager::{DEFAULT_ITEM_SIZE, ItemSizeAverager};
pub use config::{AutoSizeConfig, FixedSizeConfig, coerce_number};
pub use error::ScrollStrategyError;
pub use fixed::{DEFAULT_FIXED_ITEM_SIZE, FixedSizeVirtualScrollStrategy};
pub use strategy::VirtualScrollStrategy;
pub use types::{ContentOffsetAnchor, Range};
pub use viewport::Viewport;
