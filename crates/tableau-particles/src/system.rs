//! Named emitters ticked together, with sprite packing for the host renderer

use crate::emitter::{Emitter, EmitterConfig};
use crate::particle::ParticleSprite;
use crate::rand::ParticleRng;
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::Path;
use tableau_core::{Result, TableauError, Vec2};
use tableau_runtime::FrameSystem;

/// Sprites for one emitter, consumed by the host renderer
pub struct ParticleDrawData<'a> {
    pub name: &'a str,
    pub sprites: &'a [ParticleSprite],
}

/// Owns a set of named emitters and the RNG they share
pub struct ParticleSystem {
    emitters: BTreeMap<String, Emitter>,
    rng: ParticleRng,
    /// Alive sprites of every emitter, packed after each update
    sprite_buffer: Vec<ParticleSprite>,
    /// Per-emitter ranges into `sprite_buffer`: (name, start, count)
    sprite_ranges: Vec<(String, usize, usize)>,
}

impl ParticleSystem {
    pub fn new(seed: u32) -> Self {
        Self {
            emitters: BTreeMap::new(),
            rng: ParticleRng::new(seed),
            sprite_buffer: Vec::new(),
            sprite_ranges: Vec::new(),
        }
    }

    /// Build a system from a document of `[emitters.<name>]` tables.
    ///
    /// Besides the `EmitterConfig` keys each table may carry `autostart`
    /// (default true), `duration_ms` (negative or absent emits until
    /// stopped) and the origin as `x` / `y`.
    pub fn from_toml_str(source: &str, seed: u32) -> Result<Self> {
        let doc: toml::value::Table = toml::from_str(source)?;
        let emitters = doc
            .get("emitters")
            .and_then(|v| v.as_table())
            .ok_or_else(|| TableauError::ConfigError("missing [emitters] table".into()))?;

        let mut system = Self::new(seed);
        for (name, value) in emitters {
            let table = value.as_table().ok_or_else(|| {
                TableauError::ConfigError(format!("emitter '{name}' is not a table"))
            })?;

            let mut emitter = Emitter::new(EmitterConfig::from_toml(table));
            let origin = Vec2::new(
                table.get("x").map_or(0.0, |v| toml_f32(v, 0.0)),
                table.get("y").map_or(0.0, |v| toml_f32(v, 0.0)),
            );
            emitter.set_origin(origin);

            let autostart = table
                .get("autostart")
                .and_then(|v| v.as_bool())
                .unwrap_or(true);
            if autostart {
                let duration = table
                    .get("duration_ms")
                    .map(|v| toml_f32(v, -1.0))
                    .filter(|d| *d >= 0.0);
                emitter.start(duration, None);
            }

            system.add_emitter(name, emitter)?;
        }

        info!("Loaded {} emitter(s)", system.emitter_count());
        Ok(system)
    }

    /// Read an emitters document from disk
    pub fn load(path: impl AsRef<Path>, seed: u32) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source, seed)
    }

    /// Register an emitter under a unique, non-empty name
    pub fn add_emitter(&mut self, name: &str, emitter: Emitter) -> Result<()> {
        if name.is_empty() {
            return Err(TableauError::MissingIdentifier("emitter".into()));
        }
        if self.emitters.contains_key(name) {
            return Err(TableauError::ConfigError(format!(
                "emitter '{name}' already exists"
            )));
        }
        debug!("Added emitter '{name}' (capacity {})", emitter.capacity());
        self.emitters.insert(name.to_string(), emitter);
        Ok(())
    }

    pub fn remove_emitter(&mut self, name: &str) -> Option<Emitter> {
        self.emitters.remove(name)
    }

    pub fn emitter(&self, name: &str) -> Option<&Emitter> {
        self.emitters.get(name)
    }

    pub fn emitter_mut(&mut self, name: &str) -> Option<&mut Emitter> {
        self.emitters.get_mut(name)
    }

    pub fn emitter_names(&self) -> impl Iterator<Item = &str> {
        self.emitters.keys().map(String::as_str)
    }

    /// Number of registered emitters
    pub fn emitter_count(&self) -> usize {
        self.emitters.len()
    }

    /// Total alive particles across all emitters
    pub fn total_alive(&self) -> usize {
        self.emitters.values().map(Emitter::alive_count).sum()
    }

    /// Step every emitter, then repack sprites
    pub fn step(&mut self, dt_ms: f32) {
        for emitter in self.emitters.values_mut() {
            if !emitter.is_active() && emitter.alive_count() == 0 {
                continue;
            }
            emitter.update(&mut self.rng, dt_ms);
        }
        self.pack_sprites();
    }

    fn pack_sprites(&mut self) {
        self.sprite_buffer.clear();
        self.sprite_ranges.clear();

        for (name, emitter) in &self.emitters {
            let start = self.sprite_buffer.len();
            emitter.pack_sprites(&mut self.sprite_buffer);
            let count = self.sprite_buffer.len() - start;
            if count > 0 {
                self.sprite_ranges.push((name.clone(), start, count));
            }
        }
    }

    /// Packed sprites of every emitter, in emitter-name order
    pub fn sprite_data(&self) -> &[ParticleSprite] {
        &self.sprite_buffer
    }

    /// Sprite slices for each emitter with alive particles
    pub fn draw_data(&self) -> Vec<ParticleDrawData<'_>> {
        self.sprite_ranges
            .iter()
            .map(|(name, start, count)| ParticleDrawData {
                name,
                sprites: &self.sprite_buffer[*start..*start + *count],
            })
            .collect()
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self {
            emitters: BTreeMap::new(),
            rng: ParticleRng::default(),
            sprite_buffer: Vec::new(),
            sprite_ranges: Vec::new(),
        }
    }
}

impl FrameSystem for ParticleSystem {
    fn update(&mut self, dt_ms: f32) -> Result<()> {
        self.step(dt_ms);
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}

fn toml_f32(v: &toml::Value, default: f32) -> f32 {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
[emitters.sparks]
max_particles = 20
emission_rate = 100
life = 400
x = 50
y = 25.5

[emitters.smoke]
max_particles = 5
emission_rate = 10
autostart = false

[emitters.burst]
emission_rate = 1000
duration_ms = 30
"#;

    #[test]
    fn loads_named_emitters() {
        let system = ParticleSystem::from_toml_str(DOC, 7).unwrap();
        assert_eq!(system.emitter_count(), 3);
        assert_eq!(
            system.emitter_names().collect::<Vec<_>>(),
            vec!["burst", "smoke", "sparks"]
        );

        let sparks = system.emitter("sparks").unwrap();
        assert!(sparks.is_active());
        assert_eq!(sparks.capacity(), 20);
        assert_eq!(sparks.origin(), Vec2::new(50.0, 25.5));
        assert!(!system.emitter("smoke").unwrap().is_active());
    }

    #[test]
    fn missing_emitters_table_is_an_error() {
        let err = ParticleSystem::from_toml_str("[other]\nx = 1", 1);
        assert!(matches!(err, Err(TableauError::ConfigError(_))));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = ParticleSystem::from_toml_str("[emitters.a\n", 1);
        assert!(matches!(err, Err(TableauError::TomlParseError(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ParticleSystem::load("/nonexistent/tableau/emitters.toml", 1);
        assert!(matches!(err, Err(TableauError::IoError(_))));
    }

    #[test]
    fn duplicate_and_empty_names_are_rejected() {
        let mut system = ParticleSystem::new(1);
        system
            .add_emitter("a", Emitter::new(EmitterConfig::default()))
            .unwrap();
        assert!(system
            .add_emitter("a", Emitter::new(EmitterConfig::default()))
            .is_err());
        assert!(matches!(
            system.add_emitter("", Emitter::new(EmitterConfig::default())),
            Err(TableauError::MissingIdentifier(_))
        ));
    }

    #[test]
    fn update_packs_sprites_per_emitter() {
        let mut system = ParticleSystem::from_toml_str(DOC, 7).unwrap();
        FrameSystem::update(&mut system, 50.0).unwrap();

        // sparks: 5, burst: 50 before its duration ran out, smoke: idle
        let total = system.total_alive();
        assert!(total > 0);
        assert_eq!(system.sprite_data().len(), total);

        let draw = system.draw_data();
        assert_eq!(draw.len(), 2);
        assert!(draw.iter().all(|d| d.name != "smoke"));
        let sparks = draw.iter().find(|d| d.name == "sparks").unwrap();
        assert_eq!(sparks.sprites.len(), 5);
    }

    #[test]
    fn finished_burst_stops_emitting() {
        let mut system = ParticleSystem::from_toml_str(DOC, 7).unwrap();
        system.step(40.0);
        assert!(!system.emitter("burst").unwrap().is_active());
        let alive = system.emitter("burst").unwrap().alive_count();
        system.step(40.0);
        assert_eq!(system.emitter("burst").unwrap().alive_count(), alive);
    }

    #[test]
    fn same_seed_same_simulation() {
        let mut a = ParticleSystem::from_toml_str(DOC, 99).unwrap();
        let mut b = ParticleSystem::from_toml_str(DOC, 99).unwrap();
        for _ in 0..20 {
            a.step(16.0);
            b.step(16.0);
        }
        assert_eq!(a.sprite_data(), b.sprite_data());
    }
}
