//! A single drifting particle.
//!
//! Radius and color are fixed at creation; position and velocity mutate on
//! every tick. A particle is never removed from its field — leaving the
//! drawable area either reflects it or respawns it in place.

use glam::DVec2;
use plexus_core::{math, Rgba, Surface, Xorshift64};

use crate::config::FieldConfig;

/// Fraction of the distance to the target velocity applied per steering
/// call. A low-pass rather than an instantaneous set, so the drift stays
/// languid even when the target jumps (e.g. a touch appearing).
const STEER_GAIN: f64 = 0.001;

/// A moving point with a fixed draw radius and color.
#[derive(Debug, Clone)]
pub struct Particle {
    index: usize,
    pub(crate) position: DVec2,
    radius: f64,
    color: Rgba,
    pub(crate) velocity: DVec2,
    birth_ms: f64,
}

impl Particle {
    /// Creates a particle at a uniformly random point within the rectangle
    /// inset by `dimension / (offset_ratio + 2)` on each side, with a
    /// radius drawn from the configured range, a random unit direction
    /// scaled by the configured speed, and a birth time jittered forward by
    /// up to one lifetime so the population does not age in lockstep.
    pub(crate) fn spawn(
        index: usize,
        rng: &mut Xorshift64,
        width: f64,
        height: f64,
        offset_ratio: f64,
        config: &FieldConfig,
        now_ms: f64,
    ) -> Self {
        let denom = offset_ratio + 2.0;
        let position = math::random_point(rng, width, height, width / denom, height / denom);
        let radius = rng.next_range(config.radius_min, config.radius_max);
        let velocity = math::random_direction(rng) * config.speed;
        let birth_ms = now_ms + rng.next_range(0.0, config.life_ms);
        Self {
            index,
            position,
            radius,
            color: config.color_particle,
            velocity,
            birth_ms,
        }
    }

    /// Re-seeds position, velocity, and birth time after the particle left
    /// the drawable area. Appearance (radius, color) is kept.
    pub(crate) fn respawn(
        &mut self,
        rng: &mut Xorshift64,
        width: f64,
        height: f64,
        offset_ratio: f64,
        config: &FieldConfig,
        now_ms: f64,
    ) {
        let fresh = Self::spawn(self.index, rng, width, height, offset_ratio, config, now_ms);
        self.position = fresh.position;
        self.velocity = fresh.velocity;
        self.birth_ms = fresh.birth_ms;
    }

    /// Stable identity of this particle within its field.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current position in surface space.
    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Current velocity in surface units per tick.
    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Draw radius, fixed at creation.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Fill color, fixed at creation.
    pub fn color(&self) -> Rgba {
        self.color
    }

    /// Birth timestamp in field-clock milliseconds (includes spawn jitter).
    pub fn birth_ms(&self) -> f64 {
        self.birth_ms
    }

    /// True once the particle has outlived `life_ms`.
    ///
    /// Available to callers but not consulted by the default update loop,
    /// which respawns on leaving the drawable area instead.
    pub fn is_dead(&self, now_ms: f64, life_ms: f64) -> bool {
        now_ms - self.birth_ms > life_ms
    }

    /// Integrates position by `velocity * speed_ratio`, optionally rotating
    /// the velocity by `steer` radians first.
    ///
    /// The rotation flips the y component before and after, so a positive
    /// angle turns counterclockwise on a downward-y drawing surface.
    pub fn advance(&mut self, steer: Option<f64>, speed_ratio: f64) {
        if let Some(angle) = steer {
            let flipped = DVec2::new(self.velocity.x, -self.velocity.y);
            let rotated = math::rotate(flipped, angle);
            self.velocity = DVec2::new(rotated.x, -rotated.y);
        }
        self.position += self.velocity * speed_ratio;
    }

    /// Nudges velocity a fixed small fraction of the way toward `target`,
    /// then integrates position by `velocity * speed_ratio`.
    pub fn steer_toward(&mut self, target: DVec2, speed_ratio: f64) {
        self.velocity += (target - self.velocity) * STEER_GAIN;
        self.position += self.velocity * speed_ratio;
    }

    /// Emits the particle's filled circle.
    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.begin_path();
        surface.circle(self.position.x, self.position.y, self.radius);
        surface.fill();
        surface.close_path();
    }

    /// Emits a line segment from this particle to `other`. The caller owns
    /// path batching and the eventual stroke.
    pub fn connect_to(&self, surface: &mut dyn Surface, other: &Particle) {
        surface.move_to(self.position.x, self.position.y);
        surface.line_to(other.position.x, other.position.y);
    }
}
