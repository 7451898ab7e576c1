//! Configuration for a particle field.
//!
//! A [`FieldConfig`] is immutable for the lifetime of a field instance.
//! Overrides arrive as loose JSON from the host and are extracted with the
//! infallible param helpers; [`FieldConfig::sanitize`] then clamps hostile
//! or non-finite values so the simulation never sees them.

use plexus_core::math::clamp_finite;
use plexus_core::params::{param_bool, param_color, param_f64, param_usize};
use plexus_core::Rgba;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default number of particles.
pub const DEFAULT_COUNT: usize = 30;
/// Default particle lifetime in milliseconds.
pub const DEFAULT_LIFE_MS: f64 = 5000.0;
/// Default minimum draw radius.
pub const DEFAULT_RADIUS_MIN: f64 = 1.0;
/// Default maximum draw radius.
pub const DEFAULT_RADIUS_MAX: f64 = 2.5;
/// Default particle fill color (translucent pink).
pub const DEFAULT_COLOR_PARTICLE: Rgba = Rgba {
    r: 1.0,
    g: 0.0,
    b: 119.0 / 255.0,
    a: 77.0 / 255.0,
};
/// Default connection line color (fainter variant of the particle color).
pub const DEFAULT_COLOR_LINE: Rgba = Rgba {
    r: 1.0,
    g: 0.0,
    b: 119.0 / 255.0,
    a: 38.0 / 255.0,
};
/// Default initial speed magnitude in surface units per tick.
pub const DEFAULT_SPEED: f64 = 0.2;
/// Default steering clamp in degrees (reserved).
pub const DEFAULT_MAX_DELTA_ANGLE_DEG: f64 = 1.0;
/// Default maximum distance for drawing a connection line.
pub const DEFAULT_CONNECTION_RANGE: f64 = 45.0;
/// Default cap on connections drawn per particle per tick.
pub const DEFAULT_CONNECTION_MAX: usize = 2;
/// Default connection stroke width.
pub const DEFAULT_CONNECTION_WIDTH: f64 = 1.0;
/// Default short-range repulsion radius.
pub const DEFAULT_REPEL_RADIUS: f64 = 40.0;
/// Default repulsion strength.
pub const DEFAULT_REPEL_FORCE: f64 = 0.012;

/// Upper bound on `count`; the connection matrix is count², so this keeps
/// a hostile override from allocating gigabytes.
const MAX_COUNT: usize = 2048;

/// Immutable per-field configuration. See the field documentation for how
/// each option feeds into the tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Number of particles.
    pub count: usize,
    /// Lifetime in milliseconds before respawn eligibility.
    pub life_ms: f64,
    /// Lower bound of the draw-radius range.
    pub radius_min: f64,
    /// Upper bound of the draw-radius range.
    pub radius_max: f64,
    /// Particle fill color.
    pub color_particle: Rgba,
    /// Connection line stroke color.
    pub color_line: Rgba,
    /// Initial scalar speed magnitude.
    pub speed: f64,
    /// Steering clamp in degrees, clamped to [0, 90]. Reserved: derived to
    /// radians at field init but not applied by the default update loop.
    pub max_delta_angle_deg: f64,
    /// Maximum distance for drawing a connection line.
    pub connection_range: f64,
    /// Cap on connections drawn per particle per tick.
    pub connection_max_per_particle: usize,
    /// Stroke width for connection lines.
    pub connection_width: f64,
    /// Short-range repulsion radius.
    pub repel_radius: f64,
    /// Repulsion strength.
    pub repel_force: f64,
    /// Boundary policy: bounce (true) or respawn (false).
    pub reflect_at_edges: bool,
    /// Enables centroid/touch-seeking alignment behavior.
    pub mass_behavior: bool,
    /// Reserved flag; not separately gated in the update loop.
    pub align_with_neighbors: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            life_ms: DEFAULT_LIFE_MS,
            radius_min: DEFAULT_RADIUS_MIN,
            radius_max: DEFAULT_RADIUS_MAX,
            color_particle: DEFAULT_COLOR_PARTICLE,
            color_line: DEFAULT_COLOR_LINE,
            speed: DEFAULT_SPEED,
            max_delta_angle_deg: DEFAULT_MAX_DELTA_ANGLE_DEG,
            connection_range: DEFAULT_CONNECTION_RANGE,
            connection_max_per_particle: DEFAULT_CONNECTION_MAX,
            connection_width: DEFAULT_CONNECTION_WIDTH,
            repel_radius: DEFAULT_REPEL_RADIUS,
            repel_force: DEFAULT_REPEL_FORCE,
            reflect_at_edges: true,
            mass_behavior: true,
            align_with_neighbors: true,
        }
    }
}

impl FieldConfig {
    /// Extracts a configuration from a JSON object, falling back to the
    /// defaults for missing or mistyped keys.
    pub fn from_json(params: &Value) -> Self {
        Self {
            count: param_usize(params, "count", DEFAULT_COUNT),
            life_ms: param_f64(params, "life_ms", DEFAULT_LIFE_MS),
            radius_min: param_f64(params, "radius_min", DEFAULT_RADIUS_MIN),
            radius_max: param_f64(params, "radius_max", DEFAULT_RADIUS_MAX),
            color_particle: param_color(params, "color_particle", DEFAULT_COLOR_PARTICLE),
            color_line: param_color(params, "color_line", DEFAULT_COLOR_LINE),
            speed: param_f64(params, "speed", DEFAULT_SPEED),
            max_delta_angle_deg: param_f64(
                params,
                "max_delta_angle_deg",
                DEFAULT_MAX_DELTA_ANGLE_DEG,
            ),
            connection_range: param_f64(params, "connection_range", DEFAULT_CONNECTION_RANGE),
            connection_max_per_particle: param_usize(
                params,
                "connection_max_per_particle",
                DEFAULT_CONNECTION_MAX,
            ),
            connection_width: param_f64(params, "connection_width", DEFAULT_CONNECTION_WIDTH),
            repel_radius: param_f64(params, "repel_radius", DEFAULT_REPEL_RADIUS),
            repel_force: param_f64(params, "repel_force", DEFAULT_REPEL_FORCE),
            reflect_at_edges: param_bool(params, "reflect_at_edges", true),
            mass_behavior: param_bool(params, "mass_behavior", true),
            align_with_neighbors: param_bool(params, "align_with_neighbors", true),
        }
    }

    /// Clamps every numeric option into its valid range, substituting the
    /// default for NaN and infinities. Swaps the radius bounds if they are
    /// inverted.
    pub fn sanitize(&mut self) {
        self.count = self.count.min(MAX_COUNT);
        self.life_ms = clamp_finite(self.life_ms, 1.0, 3_600_000.0, DEFAULT_LIFE_MS);
        self.radius_min = clamp_finite(self.radius_min, 0.0, 100.0, DEFAULT_RADIUS_MIN);
        self.radius_max = clamp_finite(self.radius_max, 0.0, 100.0, DEFAULT_RADIUS_MAX);
        if self.radius_max < self.radius_min {
            std::mem::swap(&mut self.radius_min, &mut self.radius_max);
        }
        self.speed = clamp_finite(self.speed, 0.0, 100.0, DEFAULT_SPEED);
        self.max_delta_angle_deg = clamp_finite(
            self.max_delta_angle_deg,
            0.0,
            90.0,
            DEFAULT_MAX_DELTA_ANGLE_DEG,
        );
        self.connection_range =
            clamp_finite(self.connection_range, 0.0, 10_000.0, DEFAULT_CONNECTION_RANGE);
        self.connection_width =
            clamp_finite(self.connection_width, 0.0, 100.0, DEFAULT_CONNECTION_WIDTH);
        self.repel_radius = clamp_finite(self.repel_radius, 0.0, 10_000.0, DEFAULT_REPEL_RADIUS);
        self.repel_force = clamp_finite(self.repel_force, 0.0, 10.0, DEFAULT_REPEL_FORCE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_parameter_set() {
        let cfg = FieldConfig::default();
        assert_eq!(cfg.count, 30);
        assert_eq!(cfg.life_ms, 5000.0);
        assert_eq!(cfg.radius_min, 1.0);
        assert_eq!(cfg.radius_max, 2.5);
        assert_eq!(cfg.speed, 0.2);
        assert_eq!(cfg.connection_range, 45.0);
        assert_eq!(cfg.connection_max_per_particle, 2);
        assert_eq!(cfg.repel_radius, 40.0);
        assert_eq!(cfg.repel_force, 0.012);
        assert!(cfg.reflect_at_edges);
        assert!(cfg.mass_behavior);
        assert_eq!(cfg.color_particle.to_hex(), "#ff00774d");
        assert_eq!(cfg.color_line.to_hex(), "#ff007726");
    }

    #[test]
    fn from_json_overrides_listed_keys_only() {
        let cfg = FieldConfig::from_json(&json!({
            "count": 12,
            "speed": 0.5,
            "reflect_at_edges": false,
            "color_line": "#00ff0080",
        }));
        assert_eq!(cfg.count, 12);
        assert_eq!(cfg.speed, 0.5);
        assert!(!cfg.reflect_at_edges);
        assert_eq!(cfg.color_line.to_hex(), "#00ff0080");
        // untouched keys keep defaults
        assert_eq!(cfg.life_ms, DEFAULT_LIFE_MS);
        assert_eq!(cfg.connection_range, DEFAULT_CONNECTION_RANGE);
    }

    #[test]
    fn from_json_ignores_mistyped_values() {
        let cfg = FieldConfig::from_json(&json!({
            "count": "many",
            "speed": true,
            "color_particle": 42,
        }));
        assert_eq!(cfg.count, DEFAULT_COUNT);
        assert_eq!(cfg.speed, DEFAULT_SPEED);
        assert_eq!(cfg.color_particle, DEFAULT_COLOR_PARTICLE);
    }

    #[test]
    fn sanitize_clamps_steering_angle_to_quarter_turn() {
        let mut cfg = FieldConfig {
            max_delta_angle_deg: 300.0,
            ..FieldConfig::default()
        };
        cfg.sanitize();
        assert_eq!(cfg.max_delta_angle_deg, 90.0);

        cfg.max_delta_angle_deg = -10.0;
        cfg.sanitize();
        assert_eq!(cfg.max_delta_angle_deg, 0.0);
    }

    #[test]
    fn sanitize_swaps_inverted_radius_bounds() {
        let mut cfg = FieldConfig {
            radius_min: 5.0,
            radius_max: 2.0,
            ..FieldConfig::default()
        };
        cfg.sanitize();
        assert_eq!(cfg.radius_min, 2.0);
        assert_eq!(cfg.radius_max, 5.0);
    }

    #[test]
    fn sanitize_replaces_non_finite_values() {
        let mut cfg = FieldConfig {
            speed: f64::NAN,
            repel_force: f64::INFINITY,
            ..FieldConfig::default()
        };
        cfg.sanitize();
        assert_eq!(cfg.speed, DEFAULT_SPEED);
        assert_eq!(cfg.repel_force, DEFAULT_REPEL_FORCE);
    }

    #[test]
    fn sanitize_caps_particle_count() {
        let mut cfg = FieldConfig {
            count: usize::MAX,
            ..FieldConfig::default()
        };
        cfg.sanitize();
        assert!(cfg.count <= 2048);
    }

    #[test]
    fn serde_round_trip() {
        let cfg = FieldConfig {
            count: 7,
            reflect_at_edges: false,
            ..FieldConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: FieldConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn serde_field_names_match_from_json_keys() {
        let value = serde_json::to_value(FieldConfig::default()).unwrap();
        for key in [
            "count",
            "life_ms",
            "radius_min",
            "radius_max",
            "color_particle",
            "color_line",
            "speed",
            "max_delta_angle_deg",
            "connection_range",
            "connection_max_per_particle",
            "connection_width",
            "repel_radius",
            "repel_force",
            "reflect_at_edges",
            "mass_behavior",
            "align_with_neighbors",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sanitize_always_yields_usable_ranges(
                life in proptest::num::f64::ANY,
                rmin in proptest::num::f64::ANY,
                rmax in proptest::num::f64::ANY,
                speed in proptest::num::f64::ANY,
                angle in proptest::num::f64::ANY,
            ) {
                let mut cfg = FieldConfig {
                    life_ms: life,
                    radius_min: rmin,
                    radius_max: rmax,
                    speed,
                    max_delta_angle_deg: angle,
                    ..FieldConfig::default()
                };
                cfg.sanitize();
                prop_assert!(cfg.life_ms.is_finite() && cfg.life_ms >= 1.0);
                prop_assert!(cfg.radius_min.is_finite() && cfg.radius_max.is_finite());
                prop_assert!(cfg.radius_min <= cfg.radius_max);
                prop_assert!(cfg.speed.is_finite() && cfg.speed >= 0.0);
                prop_assert!((0.0..=90.0).contains(&cfg.max_delta_angle_deg));
            }
        }
    }
}
