//! Reproducible description of an animation run.
//!
//! A [`Scene`] captures surface dimensions, parameter overrides, the PRNG
//! seed, and a tick count. Two identical scenes fed to the same binary
//! draw bit-identical frames, which is what the CLI's headless render and
//! the regression tests rely on.

use crate::error::AnimationError;
use serde::{Deserialize, Serialize};

/// Everything needed to reproduce an animation run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scene {
    /// Surface width in surface-space units.
    pub width: f64,
    /// Surface height in surface-space units.
    pub height: f64,
    /// Parameter overrides, merged over the animation's defaults.
    pub params: serde_json::Value,
    /// PRNG seed.
    pub seed: u64,
    /// Number of ticks to run.
    pub ticks: usize,
}

impl Scene {
    /// Creates a scene with empty params and zero ticks.
    pub fn new(width: f64, height: f64, seed: u64) -> Self {
        Self {
            width,
            height,
            params: serde_json::Value::Object(serde_json::Map::new()),
            seed,
            ticks: 0,
        }
    }

    /// Validates that both dimensions are finite and positive.
    pub fn validate(&self) -> Result<(), AnimationError> {
        let ok = self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0;
        if ok {
            Ok(())
        } else {
            Err(AnimationError::InvalidDimensions)
        }
    }
}
