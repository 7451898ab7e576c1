#![deny(unsafe_code)]
//! Host-facing runtime for plexus animations.
//!
//! Provides the CPU [`RasterSurface`], PNG snapshots (behind the default
//! `png` feature), the fixed-rate [`Ticker`], and the [`Controller`]
//! lifecycle wrapper that ties dimension resolution, field construction,
//! and ticking together.

pub mod controller;
pub mod raster;
pub mod ticker;

#[cfg(feature = "png")]
pub mod snapshot;

pub use controller::{Controller, DimensionResolver, FixedDimensions};
pub use raster::RasterSurface;
pub use ticker::{Ticker, DEFAULT_TICK_RATE_HZ};
