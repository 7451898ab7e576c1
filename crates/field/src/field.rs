//! The particle field: owns the particle collection and runs the per-tick
//! simulation and draw pass.

use std::time::Instant;

use glam::DVec2;
use plexus_core::animation::Animation;
use plexus_core::error::AnimationError;
use plexus_core::math;
use plexus_core::surface::Surface;
use plexus_core::Xorshift64;
use serde_json::{json, Value};

use crate::config::FieldConfig;
use crate::connections::ConnectionMatrix;
use crate::particle::Particle;

/// Inset ratio for the initial seeding pass.
const INIT_INSET_RATIO: f64 = 0.01;
/// Inset ratio for respawn after leaving the drawable area. Larger than the
/// seeding inset so a respawned particle reappears well away from the edge
/// it just left.
const RESPAWN_INSET_RATIO: f64 = 2.0;
/// Weight of the attraction point in the steering target.
const ATTRACT_WEIGHT: f64 = 0.1;
/// Weight of the averaged neighbor velocity in the steering target.
const NEIGHBOR_WEIGHT: f64 = 0.9;

/// An animated field of mutually-repelling particles joined by proximity
/// lines.
///
/// One [`update`](ParticleField::update) runs the full simulation and draw
/// pass for a frame: repulsion, neighbor alignment, optional mass/touch
/// steering, boundary handling, and a single `present` at the end. The
/// O(n²) all-pairs scan is deliberate; counts stay small for a background
/// animation.
pub struct ParticleField {
    config: FieldConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    connections: ConnectionMatrix,
    touch: Option<DVec2>,
    rng: Xorshift64,
    epoch: Instant,
    max_steer_radians: f64,
    wh_inv_sq: f64,
    repel_radius_sq: f64,
}

impl ParticleField {
    /// Creates and seeds a field over a `width` × `height` surface.
    ///
    /// The configuration is sanitized before use. Returns
    /// `AnimationError::InvalidDimensions` unless both dimensions are
    /// finite and positive.
    pub fn new(
        width: f64,
        height: f64,
        mut config: FieldConfig,
        seed: u64,
    ) -> Result<Self, AnimationError> {
        let dims_ok =
            width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0;
        if !dims_ok {
            return Err(AnimationError::InvalidDimensions);
        }
        config.sanitize();
        let mut field = Self {
            max_steer_radians: config.max_delta_angle_deg.to_radians(),
            wh_inv_sq: 1.0 / (width * width + height * height),
            repel_radius_sq: config.repel_radius * config.repel_radius,
            connections: ConnectionMatrix::new(config.count),
            particles: Vec::new(),
            touch: None,
            rng: Xorshift64::new(seed),
            epoch: Instant::now(),
            config,
            width,
            height,
        };
        field.init();
        Ok(field)
    }

    /// Re-seeds every particle and clears the connection matrix, as if the
    /// field had just been constructed. Derived constants are unchanged
    /// since configuration and dimensions are fixed per instance.
    pub fn init(&mut self) {
        let now = self.now_ms();
        let mut particles = Vec::with_capacity(self.config.count);
        for index in 0..self.config.count {
            particles.push(Particle::spawn(
                index,
                &mut self.rng,
                self.width,
                self.height,
                INIT_INSET_RATIO,
                &self.config,
                now,
            ));
        }
        self.particles = particles;
        self.connections = ConnectionMatrix::new(self.config.count);
    }

    /// Runs one simulation and render tick against `surface`.
    ///
    /// Pass order per particle: repulsion against every other particle,
    /// neighbor-velocity accumulation, capped connection drawing, optional
    /// mass steering, stroke flush, particle fill, boundary handling. The
    /// frame ends with a single `present`.
    pub fn update(&mut self, surface: &mut dyn Surface) -> Result<(), AnimationError> {
        let n = self.particles.len();
        let range_sq = self.config.connection_range * self.config.connection_range;
        let now = self.now_ms();

        surface.set_fill_color(self.config.color_particle);
        surface.set_stroke_color(self.config.color_line);
        surface.set_line_width(self.config.connection_width);
        self.connections.clear();

        // The attraction point is the fixed surface midpoint, not the true
        // particle centroid; a touch position overrides it for the whole
        // population.
        let attractor = if self.config.mass_behavior {
            Some(
                self.touch
                    .unwrap_or_else(|| DVec2::new(self.width, self.height) * 0.5),
            )
        } else {
            None
        };

        for i in 0..n {
            surface.begin_path();
            let mut drawn = 0usize;
            let mut neighbor_sum = DVec2::ZERO;
            let mut neighbor_count = 0usize;

            for j in 0..n {
                if j == i {
                    continue;
                }
                let (p, q) = pair_mut(&mut self.particles, i, j);
                let delta = p.position - q.position;
                let rq = delta.length_squared();

                // Smoothly falling-off repulsion, positive inside the repel
                // radius. The same push is applied to both particles in
                // opposite directions, so the pair's momentum is unchanged.
                let falloff = self.repel_radius_sq / (rq + self.repel_radius_sq) - 0.5;
                if falloff > 0.0 {
                    let push = delta * (falloff * self.config.repel_force);
                    p.position += push;
                    q.position -= push;
                }

                // Proximity test uses the pre-repulsion distance.
                if rq < range_sq {
                    neighbor_sum += q.velocity;
                    neighbor_count += 1;
                    if drawn <= self.config.connection_max_per_particle
                        && !self.connections.is_connected(i, j)
                    {
                        p.connect_to(surface, q);
                        self.connections.record(i, j);
                        drawn += 1;
                    }
                }
            }

            let p = &mut self.particles[i];
            if let Some(goal) = attractor {
                // A particle with no neighbors in range aligns with its own
                // velocity, avoiding the 0/0 average.
                let neighbor_avg = if neighbor_count > 0 {
                    neighbor_sum / neighbor_count as f64
                } else {
                    p.velocity
                };
                let look = goal - p.position;
                let target = look * ATTRACT_WEIGHT + neighbor_avg * NEIGHBOR_WEIGHT;
                // Soft governor: fades the target toward zero as its squared
                // length approaches the surface diagonal squared.
                let governor = (1.0 - target.length_squared() * self.wh_inv_sq).max(0.0);
                p.steer_toward(target * governor, 1.0);
            }

            surface.stroke();
            surface.close_path();
            p.draw(surface);

            if !math::in_area(p.position, self.width, self.height) {
                if self.config.reflect_at_edges {
                    Self::reflect(p, self.width, self.height);
                } else {
                    p.respawn(
                        &mut self.rng,
                        self.width,
                        self.height,
                        RESPAWN_INSET_RATIO,
                        &self.config,
                        now,
                    );
                }
            }
        }

        surface.present();
        Ok(())
    }

    /// Mirrors the particle back across each boundary it crossed and
    /// inverts the matching velocity component. Speed magnitude is
    /// preserved exactly.
    fn reflect(p: &mut Particle, width: f64, height: f64) {
        if p.position.y < 0.0 {
            p.position.y = -p.position.y;
            p.velocity.y = -p.velocity.y;
        }
        if p.position.y > height {
            p.position.y = height - (p.position.y - height);
            p.velocity.y = -p.velocity.y;
        }
        if p.position.x < 0.0 {
            p.position.x = -p.position.x;
            p.velocity.x = -p.velocity.x;
        }
        if p.position.x > width {
            p.position.x = width - (p.position.x - width);
            p.velocity.x = -p.velocity.x;
        }
    }

    /// Sets the attraction override point used by mass behavior.
    pub fn set_touch(&mut self, x: f64, y: f64) {
        self.touch = Some(DVec2::new(x, y));
    }

    /// Removes the attraction override.
    pub fn clear_touch(&mut self) {
        self.touch = None;
    }

    /// Current attraction override, if any.
    pub fn touch(&self) -> Option<DVec2> {
        self.touch
    }

    /// Surface width in surface-space units.
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Surface height in surface-space units.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The sanitized configuration this field runs with.
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Read-only view of the particle collection.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Read-only view of this tick's connection matrix.
    pub fn connections(&self) -> &ConnectionMatrix {
        &self.connections
    }

    /// Steering clamp in radians, derived from `max_delta_angle_deg`.
    /// Reserved: not applied by the default update loop.
    pub fn max_steer_radians(&self) -> f64 {
        self.max_steer_radians
    }

    /// Milliseconds since the field was constructed; the field's clock for
    /// birth timestamps.
    fn now_ms(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64() * 1000.0
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }
}

/// Simultaneous mutable access to two distinct particles.
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert_ne!(i, j);
    if i < j {
        let (head, tail) = particles.split_at_mut(j);
        (&mut head[i], &mut tail[0])
    } else {
        let (head, tail) = particles.split_at_mut(i);
        (&mut tail[0], &mut head[j])
    }
}

impl Animation for ParticleField {
    fn tick(&mut self, surface: &mut dyn Surface) -> Result<(), AnimationError> {
        self.update(surface)
    }

    fn params(&self) -> Value {
        json!({
            "count": self.config.count,
            "life_ms": self.config.life_ms,
            "radius_min": self.config.radius_min,
            "radius_max": self.config.radius_max,
            "color_particle": self.config.color_particle.to_hex(),
            "color_line": self.config.color_line.to_hex(),
            "speed": self.config.speed,
            "max_delta_angle_deg": self.config.max_delta_angle_deg,
            "connection_range": self.config.connection_range,
            "connection_max_per_particle": self.config.connection_max_per_particle,
            "connection_width": self.config.connection_width,
            "repel_radius": self.config.repel_radius,
            "repel_force": self.config.repel_force,
            "reflect_at_edges": self.config.reflect_at_edges,
            "mass_behavior": self.config.mass_behavior,
            "align_with_neighbors": self.config.align_with_neighbors,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "count": {
                "type": "integer",
                "default": crate::config::DEFAULT_COUNT,
                "min": 0,
                "max": 2048,
                "description": "Number of particles"
            },
            "life_ms": {
                "type": "number",
                "default": crate::config::DEFAULT_LIFE_MS,
                "min": 1.0,
                "max": 3_600_000.0,
                "description": "Lifetime in milliseconds before respawn eligibility"
            },
            "radius_min": {
                "type": "number",
                "default": crate::config::DEFAULT_RADIUS_MIN,
                "min": 0.0,
                "max": 100.0,
                "description": "Lower bound of the particle draw radius"
            },
            "radius_max": {
                "type": "number",
                "default": crate::config::DEFAULT_RADIUS_MAX,
                "min": 0.0,
                "max": 100.0,
                "description": "Upper bound of the particle draw radius"
            },
            "color_particle": {
                "type": "color",
                "default": crate::config::DEFAULT_COLOR_PARTICLE.to_hex(),
                "description": "Particle fill color as #rrggbb or #rrggbbaa"
            },
            "color_line": {
                "type": "color",
                "default": crate::config::DEFAULT_COLOR_LINE.to_hex(),
                "description": "Connection line color as #rrggbb or #rrggbbaa"
            },
            "speed": {
                "type": "number",
                "default": crate::config::DEFAULT_SPEED,
                "min": 0.0,
                "max": 100.0,
                "description": "Initial speed magnitude in surface units per tick"
            },
            "max_delta_angle_deg": {
                "type": "number",
                "default": crate::config::DEFAULT_MAX_DELTA_ANGLE_DEG,
                "min": 0.0,
                "max": 90.0,
                "description": "Reserved steering clamp in degrees"
            },
            "connection_range": {
                "type": "number",
                "default": crate::config::DEFAULT_CONNECTION_RANGE,
                "min": 0.0,
                "max": 10_000.0,
                "description": "Maximum distance for drawing a connection line"
            },
            "connection_max_per_particle": {
                "type": "integer",
                "default": crate::config::DEFAULT_CONNECTION_MAX,
                "min": 0,
                "description": "Cap on connections drawn per particle per tick"
            },
            "connection_width": {
                "type": "number",
                "default": crate::config::DEFAULT_CONNECTION_WIDTH,
                "min": 0.0,
                "max": 100.0,
                "description": "Stroke width for connection lines"
            },
            "repel_radius": {
                "type": "number",
                "default": crate::config::DEFAULT_REPEL_RADIUS,
                "min": 0.0,
                "max": 10_000.0,
                "description": "Short-range repulsion radius"
            },
            "repel_force": {
                "type": "number",
                "default": crate::config::DEFAULT_REPEL_FORCE,
                "min": 0.0,
                "max": 10.0,
                "description": "Repulsion strength"
            },
            "reflect_at_edges": {
                "type": "boolean",
                "default": true,
                "description": "Bounce at edges (true) or respawn (false)"
            },
            "mass_behavior": {
                "type": "boolean",
                "default": true,
                "description": "Steer toward the surface midpoint or touch point"
            },
            "align_with_neighbors": {
                "type": "boolean",
                "default": true,
                "description": "Reserved; neighbor alignment is part of mass behavior"
            }
        })
    }
}
