//! Headless emitter simulation

use anyhow::{Context, Result};
use tableau_particles::ParticleSystem;
use tableau_runtime::{FrameClock, FrameSystem};

pub struct SimulateArgs {
    pub config: String,
    pub frames: u32,
    pub dt: f32,
    pub seed: u32,
    pub every: u32,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let mut system = ParticleSystem::load(&args.config, args.seed)
        .with_context(|| format!("Failed to load emitter config: {}", args.config))?;

    let names: Vec<String> = system.emitter_names().map(str::to_string).collect();
    println!(
        "Simulating {} emitter(s) for {} frame(s) at {} ms",
        names.len(),
        args.frames,
        args.dt
    );

    let mut clock = FrameClock::new();
    let every = args.every.max(1);
    let mut peak = 0;

    for frame in 1..=args.frames {
        let dt = clock.advance(args.dt);
        system.update(dt)?;
        peak = peak.max(system.total_alive());

        if frame % every == 0 || frame == args.frames {
            let counts: Vec<String> = names
                .iter()
                .filter_map(|name| {
                    system
                        .emitter(name)
                        .map(|e| format!("{name}={}/{}", e.alive_count(), e.capacity()))
                })
                .collect();
            println!(
                "  frame {:>5}  t={:>8.1} ms  alive={:>5}  [{}]",
                frame,
                clock.total_ms,
                system.total_alive(),
                counts.join(", ")
            );
        }
    }

    println!("Peak alive: {peak}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use tableau_core::{NodeId, Viewport};
    use tableau_director::{Director, DisplayList, SceneEntity};
    use tableau_runtime::SystemSchedule;

    struct Ticker {
        node: NodeId,
        ticks: Rc<RefCell<Vec<f32>>>,
    }

    impl SceneEntity for Ticker {
        fn node(&self) -> NodeId {
            self.node
        }

        fn update(&mut self, dt_ms: f32) {
            self.ticks.borrow_mut().push(dt_ms);
        }
    }

    #[test]
    fn director_and_particles_share_a_schedule() {
        let ticks = Rc::new(RefCell::new(Vec::new()));
        let mut director = Director::new(DisplayList::new(Viewport::default()));
        director
            .add(
                "title",
                Box::new(Ticker {
                    node: NodeId::new(),
                    ticks: ticks.clone(),
                }),
            )
            .unwrap();
        assert!(director.push("title"));

        let particles = ParticleSystem::from_toml_str(
            "[emitters.sparks]\nemission_rate = 100\nmax_particles = 4\n",
            3,
        )
        .unwrap();

        let mut schedule = SystemSchedule::new();
        schedule.add(Box::new(director));
        schedule.add(Box::new(particles));
        assert_eq!(schedule.names(), vec!["director", "particles"]);

        let mut clock = FrameClock::new();
        for _ in 0..3 {
            let dt = clock.advance(16.0);
            schedule.update(dt).unwrap();
        }
        assert_eq!(*ticks.borrow(), vec![16.0, 16.0, 16.0]);
    }
}
