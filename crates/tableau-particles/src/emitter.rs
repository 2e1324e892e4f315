//! Emitter configuration (parsed from TOML) and the emission/integration loop

use crate::particle::{ParticlePool, ParticleSprite};
use crate::rand::ParticleRng;
use log::{debug, trace};
use tableau_core::Vec2;

/// Hard ceiling on pool capacity accepted from config
const MAX_POOL: usize = 10_000;

/// A base value plus a symmetric variance: samples fall in `base ± var`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spread {
    pub base: f32,
    pub var: f32,
}

impl Spread {
    pub const fn new(base: f32, var: f32) -> Self {
        Self { base, var }
    }

    pub const fn fixed(base: f32) -> Self {
        Self { base, var: 0.0 }
    }

    pub fn sample(&self, rng: &mut ParticleRng) -> f32 {
        self.base + self.var * rng.signed()
    }
}

/// Emission parameters. Times are milliseconds, angles degrees, distances
/// render-tree units, accelerations units per second squared.
#[derive(Debug, Clone, PartialEq)]
pub struct EmitterConfig {
    pub max_particles: usize,
    /// Particles per second
    pub emission_rate: f32,
    /// Launch angle, measured from +x towards +y
    pub angle: Spread,
    /// Spawn offset from the origin, per axis
    pub position_var: Vec2,
    pub life: Spread,
    pub speed: Spread,
    pub start_alpha: Spread,
    pub end_alpha: Spread,
    pub start_rotation: Spread,
    pub end_rotation: Spread,
    pub start_scale: Spread,
    pub end_scale: Spread,
    pub radial_accel: Spread,
    pub tangential_accel: Spread,
    pub gravity: Vec2,
    pub gravity_var: Vec2,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            max_particles: 100,
            emission_rate: 10.0,
            angle: Spread::new(-90.0, 10.0),
            position_var: Vec2::ZERO,
            life: Spread::new(1000.0, 0.0),
            speed: Spread::new(100.0, 0.0),
            start_alpha: Spread::fixed(1.0),
            end_alpha: Spread::fixed(0.0),
            start_rotation: Spread::fixed(0.0),
            end_rotation: Spread::fixed(0.0),
            start_scale: Spread::fixed(1.0),
            end_scale: Spread::fixed(1.0),
            radial_accel: Spread::fixed(0.0),
            tangential_accel: Spread::fixed(0.0),
            gravity: Vec2::ZERO,
            gravity_var: Vec2::ZERO,
        }
    }
}

impl EmitterConfig {
    /// Parse an EmitterConfig from a TOML table. Each varied quantity `q`
    /// reads `q` for its base and `q_var` for its variance.
    pub fn from_toml(table: &toml::value::Table) -> Self {
        let mut config = Self::default();

        if let Some(v) = table.get("max_particles") {
            let n = v.as_integer().unwrap_or(100).max(0) as usize;
            config.max_particles = n.min(MAX_POOL);
        }
        if let Some(v) = table.get("emission_rate") {
            config.emission_rate = toml_f32(v, config.emission_rate).max(0.0);
        }
        if let Some(v) = table.get("position_var") {
            config.position_var = toml_vec2(v, config.position_var);
        }
        if let Some(v) = table.get("gravity") {
            config.gravity = toml_vec2(v, config.gravity);
        }
        if let Some(v) = table.get("gravity_var") {
            config.gravity_var = toml_vec2(v, config.gravity_var);
        }

        let spreads: [(&str, &mut Spread); 11] = [
            ("angle", &mut config.angle),
            ("life", &mut config.life),
            ("speed", &mut config.speed),
            ("start_alpha", &mut config.start_alpha),
            ("end_alpha", &mut config.end_alpha),
            ("start_rotation", &mut config.start_rotation),
            ("end_rotation", &mut config.end_rotation),
            ("start_scale", &mut config.start_scale),
            ("end_scale", &mut config.end_scale),
            ("radial_accel", &mut config.radial_accel),
            ("tangential_accel", &mut config.tangential_accel),
        ];
        for (key, spread) in spreads {
            if let Some(v) = table.get(key) {
                spread.base = toml_f32(v, spread.base);
            }
            if let Some(v) = table.get(&format!("{key}_var")) {
                spread.var = toml_f32(v, spread.var).abs();
            }
        }

        config
    }
}

/// A fixed-capacity emitter: spawns at `emission_rate` while active and
/// integrates alive particles every update.
pub struct Emitter {
    pub config: EmitterConfig,
    pool: ParticlePool,
    /// Emission origin; radial acceleration points away from it
    origin: Vec2,
    /// Time owed to emission, consumed one period per spawn
    emission_timer: f32,
    /// Time spent emitting since `start`
    elapsed: f32,
    /// `None` emits until stopped
    duration: Option<f32>,
    active: bool,
}

impl Emitter {
    pub fn new(config: EmitterConfig) -> Self {
        let pool = ParticlePool::new(config.max_particles);
        Self {
            config,
            pool,
            origin: Vec2::ZERO,
            emission_timer: 0.0,
            elapsed: 0.0,
            duration: None,
            active: false,
        }
    }

    /// Begin emitting for `duration_ms` (`None` = until stopped), optionally
    /// moving the origin first.
    pub fn start(&mut self, duration_ms: Option<f32>, origin: Option<Vec2>) {
        self.elapsed = 0.0;
        self.active = true;
        self.duration = duration_ms;
        if let Some(origin) = origin {
            self.origin = origin;
        }
        debug!(
            "Emitter started at ({}, {}) for {:?} ms",
            self.origin.x, self.origin.y, duration_ms
        );
    }

    /// Stop emitting. Alive particles live out their lifespan.
    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Stop and kill every particle
    pub fn reset(&mut self) {
        self.active = false;
        self.elapsed = 0.0;
        self.emission_timer = 0.0;
        self.pool.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    pub fn alive_count(&self) -> usize {
        self.pool.alive_count()
    }

    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    pub fn particles(&self) -> &[crate::particle::Particle] {
        self.pool.alive_slice()
    }

    /// Spawn one particle now. Returns false when the pool is full.
    pub fn spawn(&mut self, rng: &mut ParticleRng) -> bool {
        let config = &self.config;
        let origin = self.origin;
        let Some(p) = self.pool.spawn() else {
            return false;
        };

        let life = config.life.sample(rng);
        p.life = life;
        p.start_life = life;

        p.position = Vec2::new(
            origin.x + config.position_var.x * rng.signed(),
            origin.y + config.position_var.y * rng.signed(),
        );

        let angle = config.angle.sample(rng).to_radians();
        p.direction = Vec2::new(angle.cos(), angle.sin());
        p.speed = config.speed.sample(rng);

        // End values are fixed now; a longer life only slows the change
        let per_ms = |start: f32, end: f32| if life > 0.0 { (end - start) / life } else { 0.0 };

        let start_alpha = config.start_alpha.sample(rng).clamp(0.0, 1.0);
        let end_alpha = config.end_alpha.sample(rng).clamp(0.0, 1.0);
        p.alpha = start_alpha;
        p.delta_alpha = per_ms(start_alpha, end_alpha);

        let start_rotation = config.start_rotation.sample(rng);
        let end_rotation = config.end_rotation.sample(rng);
        p.rotation = start_rotation;
        p.delta_rotation = per_ms(start_rotation, end_rotation);

        let start_scale = config.start_scale.sample(rng).max(0.0);
        let end_scale = config.end_scale.sample(rng).max(0.0);
        p.scale = start_scale;
        p.delta_scale = per_ms(start_scale, end_scale);

        p.radial_accel = config.radial_accel.sample(rng);
        p.tangential_accel = config.tangential_accel.sample(rng);
        p.gravity = Vec2::new(
            config.gravity.x + config.gravity_var.x * rng.signed(),
            config.gravity.y + config.gravity_var.y * rng.signed(),
        );
        true
    }

    /// Emit (if active) and integrate every alive particle by `dt_ms`.
    pub fn update(&mut self, rng: &mut ParticleRng, dt_ms: f32) {
        if self.active {
            self.emit(rng, dt_ms);
        }
        self.integrate(dt_ms);
    }

    fn emit(&mut self, rng: &mut ParticleRng, dt_ms: f32) {
        self.emission_timer += dt_ms;
        if self.config.emission_rate > 0.0 {
            let period = 1000.0 / self.config.emission_rate;
            let mut spawned = 0u32;
            // Large deltas catch up with several spawns in one frame
            while !self.pool.is_full() && self.emission_timer >= period {
                self.spawn(rng);
                self.emission_timer -= period;
                spawned += 1;
            }
            if spawned > 0 {
                trace!("Spawned {spawned} particle(s), {} alive", self.alive_count());
            }
        }

        self.elapsed += dt_ms;
        if let Some(duration) = self.duration {
            if self.elapsed > duration {
                self.active = false;
                debug!("Emitter finished after {} ms", self.elapsed);
            }
        }
    }

    fn integrate(&mut self, dt_ms: f32) {
        let dt_s = dt_ms / 1000.0;
        let origin = self.origin;

        let mut i = 0;
        while i < self.pool.alive_count() {
            let p = &mut self.pool.alive_slice_mut()[i];

            // A particle sitting on the origin has no radial direction
            let radial = if p.position != origin {
                (p.position - origin).normalized()
            } else {
                Vec2::ZERO
            };
            let tangential = radial.perp() * p.tangential_accel;
            let accel = radial * p.radial_accel + tangential + p.gravity;
            p.direction += accel * dt_s;

            p.alpha = (p.alpha + p.delta_alpha * dt_ms).clamp(0.0, 1.0);
            p.scale = (p.scale + p.delta_scale * dt_ms).max(0.0);
            p.rotation += p.delta_rotation * dt_ms;

            p.position += p.direction * (p.speed * dt_s);

            p.life -= dt_ms;
            if p.life <= 0.0 {
                // The swapped-in particle still needs integrating
                self.pool.kill(i);
            } else {
                i += 1;
            }
        }
    }

    /// Append a sprite for every alive, visible particle
    pub fn pack_sprites(&self, out: &mut Vec<ParticleSprite>) {
        out.extend(
            self.pool
                .alive_slice()
                .iter()
                .filter(|p| p.visible)
                .map(ParticleSprite::from_particle),
        );
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

fn toml_vec2(v: &toml::Value, default: Vec2) -> Vec2 {
    if let Some(arr) = v.as_array() {
        if arr.len() >= 2 {
            return Vec2::new(toml_f32(&arr[0], default.x), toml_f32(&arr[1], default.y));
        }
    }
    default
}
