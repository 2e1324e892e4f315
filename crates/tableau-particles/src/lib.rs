//! Tableau Particles - Fixed-capacity 2D particle emitters
//!
//! Provides pooled per-emitter particle simulation with:
//! - Rate-driven emission with catch-up on large frame deltas
//! - Radial, tangential and gravity acceleration per particle
//! - Linear alpha/scale/rotation interpolation over each particle's life
//! - Swap-remove particle pool for O(1) kill
//! - `Pod` sprite packing for the host renderer

pub mod emitter;
pub mod particle;
pub mod rand;
pub mod system;

pub use emitter::{Emitter, EmitterConfig, Spread};
pub use particle::{Particle, ParticlePool, ParticleSprite};
pub use rand::ParticleRng;
pub use system::{ParticleDrawData, ParticleSystem};
