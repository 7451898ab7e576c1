#![deny(unsafe_code)]
//! Drifting-particle proximity-line animation engine.
//!
//! A [`ParticleField`] simulates a small population of mutually-repelling
//! particles, draws lines between close pairs, and optionally steers the
//! population toward the surface midpoint or an externally supplied touch
//! point. It implements [`plexus_core::Animation`] and draws against any
//! [`plexus_core::Surface`].

pub mod config;
pub mod connections;
pub mod field;
pub mod particle;

pub use config::FieldConfig;
pub use connections::ConnectionMatrix;
pub use field::ParticleField;
pub use particle::Particle;
