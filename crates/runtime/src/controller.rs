//! Public lifecycle wrapper around a running particle field.
//!
//! Construction is two-phase: a [`DimensionResolver`] supplies the surface
//! dimensions (the host-specific, possibly asynchronous part), then the
//! field is built synchronously and a 60 Hz [`Ticker`] starts immediately.
//! A resolution or construction failure yields `None` — logged, never a
//! panic — and the simulation core is not constructed at all.

use plexus_core::error::AnimationError;
use plexus_core::surface::Surface;
use plexus_field::{FieldConfig, ParticleField};
use serde_json::Value;

use crate::ticker::{Ticker, DEFAULT_TICK_RATE_HZ};

/// Supplies surface dimensions before the field can be constructed.
///
/// Hosts implement this against whatever their UI toolkit offers for
/// measuring the target element.
pub trait DimensionResolver {
    /// Returns `(width, height)` in surface-space units, or an error when
    /// the target element cannot be measured.
    fn resolve(&self) -> Result<(f64, f64), AnimationError>;
}

/// Resolver for hosts that already know the dimensions.
#[derive(Debug, Clone, Copy)]
pub struct FixedDimensions {
    pub width: f64,
    pub height: f64,
}

impl DimensionResolver for FixedDimensions {
    fn resolve(&self) -> Result<(f64, f64), AnimationError> {
        Ok((self.width, self.height))
    }
}

/// A running particle-field animation with its lifecycle controls.
pub struct Controller<S>
where
    S: Surface + Send + 'static,
{
    ticker: Option<Ticker<ParticleField, S>>,
}

impl<S> Controller<S>
where
    S: Surface + Send + 'static,
{
    /// Resolves dimensions, constructs the field from `overrides` merged
    /// over the default configuration, and starts ticking at 60 Hz.
    ///
    /// Returns `None` when dimension resolution, field construction, or
    /// thread spawn fails; the cause is logged.
    pub fn create(
        resolver: &dyn DimensionResolver,
        surface: S,
        overrides: &Value,
        seed: u64,
    ) -> Option<Self> {
        let (width, height) = match resolver.resolve() {
            Ok(dims) => dims,
            Err(e) => {
                log::error!("could not resolve surface dimensions: {e}");
                return None;
            }
        };
        let config = FieldConfig::from_json(overrides);
        let field = match ParticleField::new(width, height, config, seed) {
            Ok(field) => field,
            Err(e) => {
                log::error!("could not construct particle field: {e}");
                return None;
            }
        };
        match Ticker::start(field, surface, DEFAULT_TICK_RATE_HZ) {
            Ok(ticker) => {
                log::info!("particle field running at {width}x{height}");
                Some(Self {
                    ticker: Some(ticker),
                })
            }
            Err(e) => {
                log::error!("could not start tick loop: {e}");
                None
            }
        }
    }

    /// Sets the touch attraction point for all particles.
    pub fn set_touch(&self, x: f64, y: f64) {
        if let Some(ticker) = &self.ticker {
            ticker.mutate(move |field| field.set_touch(x, y));
        }
    }

    /// Clears the touch attraction point.
    pub fn clear_touch(&self) {
        if let Some(ticker) = &self.ticker {
            ticker.mutate(|field| field.clear_touch());
        }
    }

    /// Re-seeds the field to its configured particle count.
    pub fn init(&self) {
        if let Some(ticker) = &self.ticker {
            ticker.mutate(|field| field.init());
        }
    }

    /// True until the first `destroy`.
    pub fn is_running(&self) -> bool {
        self.ticker.as_ref().is_some_and(Ticker::is_running)
    }

    /// Stops ticking and releases the field, returning it together with the
    /// surface. Later calls return `None`.
    pub fn destroy(&mut self) -> Option<(ParticleField, S)> {
        let state = self.ticker.take()?.stop();
        log::info!("particle field destroyed");
        state
    }
}

impl<S> Drop for Controller<S>
where
    S: Surface + Send + 'static,
{
    fn drop(&mut self) {
        self.ticker.take();
    }
}
