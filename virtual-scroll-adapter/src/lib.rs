//! Host-side helpers for the `virtual-scroll` crate.
//!
//! `virtual-scroll` only decides what to render; a host has to measure, lay out, and feed events
//! back. This crate provides a reference host that does all of that in memory:
//!
//! - [`ListViewport`]: a [`virtual_scroll::Viewport`] over items with known sizes, with a log of
//!   every command it received
//! - [`Controller`]: forwards scroll, data, and resize events to a strategy and runs the render
//!   pass that follows
//!
//! It is useful for simulations and tests, and as a template for real framework bindings.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod fenwick;
mod list_viewport;

#[cfg(test)]
mod tests;

pub use controller::Controller;
pub use list_viewport::{ListViewport, ViewportCommand};
