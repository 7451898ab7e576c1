//! The core `Animation` trait implemented by every plexus animation.
//!
//! The trait is object-safe so front-ends can drive a `Box<dyn Animation>`
//! without knowing the concrete simulation.

use crate::error::AnimationError;
use crate::surface::Surface;
use serde_json::Value;

/// A step-based animation that draws onto a [`Surface`].
///
/// One `tick` advances the simulation and issues a complete frame of draw
/// commands, ending with the surface's `present`. Ticks are synchronous;
/// the caller owns the pacing.
pub trait Animation {
    /// Advances the animation by one tick and draws the frame.
    ///
    /// A returned error means this tick's frame is lost; it does not
    /// invalidate the animation, and the caller may keep ticking.
    fn tick(&mut self, surface: &mut dyn Surface) -> Result<(), AnimationError>;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the accepted parameters, their types, ranges, and
    /// defaults.
    fn param_schema(&self) -> Value;
}
