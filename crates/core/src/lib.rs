#![deny(unsafe_code)]
//! Core types and traits for the plexus particle animation system.
//!
//! Provides the [`Surface`] drawing contract, the [`Animation`] trait,
//! the [`Rgba`] color type, 2D vector math helpers, the [`Xorshift64`]
//! PRNG, parameter extraction helpers, and the reproducible [`Scene`]
//! description.

pub mod animation;
pub mod color;
pub mod error;
pub mod math;
pub mod params;
pub mod prng;
pub mod scene;
pub mod surface;

pub use animation::Animation;
pub use color::Rgba;
pub use error::AnimationError;
pub use prng::Xorshift64;
pub use scene::Scene;
pub use surface::{RecordingSurface, Surface, SurfaceCommand};
