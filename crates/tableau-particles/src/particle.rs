//! Particle records, the swap-remove pool, and packed sprite data

use bytemuck::{Pod, Zeroable};
use tableau_core::Vec2;

/// Simulation state for one particle.
///
/// Alpha, rotation and scale move linearly towards end values sampled at
/// spawn time; the `delta_*` fields hold that change per millisecond.
#[derive(Clone, Debug)]
pub struct Particle {
    pub position: Vec2,
    /// Unit direction at spawn, bent by accelerations afterwards
    pub direction: Vec2,
    pub speed: f32,
    /// Remaining life in milliseconds
    pub life: f32,
    /// Life sampled at spawn
    pub start_life: f32,
    pub alpha: f32,
    pub delta_alpha: f32,
    /// Degrees
    pub rotation: f32,
    pub delta_rotation: f32,
    pub scale: f32,
    pub delta_scale: f32,
    pub radial_accel: f32,
    pub tangential_accel: f32,
    pub gravity: Vec2,
    pub visible: bool,
}

impl Particle {
    pub fn dead() -> Self {
        Self {
            position: Vec2::ZERO,
            direction: Vec2::ZERO,
            speed: 0.0,
            life: 0.0,
            start_life: 0.0,
            alpha: 0.0,
            delta_alpha: 0.0,
            rotation: 0.0,
            delta_rotation: 0.0,
            scale: 0.0,
            delta_scale: 0.0,
            radial_accel: 0.0,
            tangential_accel: 0.0,
            gravity: Vec2::ZERO,
            visible: false,
        }
    }

    /// Fraction of life used, in [0, 1]
    pub fn age_ratio(&self) -> f32 {
        if self.start_life <= 0.0 {
            1.0
        } else {
            (1.0 - self.life / self.start_life).clamp(0.0, 1.0)
        }
    }
}

/// Draw record for one live particle, laid out for direct upload.
/// 20 bytes, 4-byte aligned.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleSprite {
    pub position: [f32; 2],
    pub scale: f32,
    pub rotation: f32,
    pub alpha: f32,
}

impl ParticleSprite {
    pub fn from_particle(p: &Particle) -> Self {
        Self {
            position: [p.position.x, p.position.y],
            scale: p.scale,
            rotation: p.rotation,
            alpha: p.alpha,
        }
    }
}

/// Fixed-capacity pool. Records `[0, alive_count)` are alive; dead records
/// are swapped to the tail so removal is O(1) and nothing is allocated after
/// construction.
pub struct ParticlePool {
    particles: Vec<Particle>,
    alive_count: usize,
}

impl ParticlePool {
    pub fn new(capacity: usize) -> Self {
        let mut particles = Vec::with_capacity(capacity);
        for _ in 0..capacity {
            particles.push(Particle::dead());
        }
        Self {
            particles,
            alive_count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_count
    }

    pub fn is_full(&self) -> bool {
        self.alive_count >= self.particles.len()
    }

    /// Claim the first dead record, returning it for initialization.
    /// Returns None if the pool is full.
    pub fn spawn(&mut self) -> Option<&mut Particle> {
        if self.is_full() {
            return None;
        }
        let idx = self.alive_count;
        self.alive_count += 1;
        let p = &mut self.particles[idx];
        p.visible = true;
        Some(p)
    }

    /// Kill the alive record at `index` by swapping it with the last alive
    /// record. The record previously at the tail now sits at `index`.
    pub fn kill(&mut self, index: usize) {
        if index >= self.alive_count {
            return;
        }
        self.particles[index].visible = false;
        self.alive_count -= 1;
        if index < self.alive_count {
            self.particles.swap(index, self.alive_count);
        }
    }

    /// Kill every particle
    pub fn clear(&mut self) {
        for p in &mut self.particles[..self.alive_count] {
            p.visible = false;
        }
        self.alive_count = 0;
    }

    /// Access alive particles slice for reading (first `alive_count` elements)
    pub fn alive_slice(&self) -> &[Particle] {
        &self.particles[..self.alive_count]
    }

    /// Access alive particles mutably
    pub fn alive_slice_mut(&mut self) -> &mut [Particle] {
        &mut self.particles[..self.alive_count]
    }
}
