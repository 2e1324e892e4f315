//! Step a push transition between two placeholder scenes and print the
//! animated node properties frame by frame

use anyhow::{anyhow, Result};
use log::info;
use tableau_core::{NodeId, Viewport};
use tableau_director::{
    Direction, Director, DisplayList, RenderTree, SceneEntity, TransitionConfig, TransitionKind,
};
use tableau_runtime::FrameClock;

/// Smallest frame step; keeps every step large enough to move the tween
const MIN_DT_MS: f32 = 1.0;

pub struct PreviewArgs {
    pub kind: String,
    pub time: f32,
    pub direction: Direction,
    pub easing: String,
    pub dt: f32,
}

/// A scene with nothing to draw; logs its hooks
struct Placeholder {
    node: NodeId,
    label: &'static str,
}

impl Placeholder {
    fn boxed(label: &'static str) -> Box<dyn SceneEntity> {
        Box::new(Self {
            node: NodeId::new(),
            label,
        })
    }
}

impl SceneEntity for Placeholder {
    fn node(&self) -> NodeId {
        self.node
    }

    fn enter(&mut self) {
        info!("{} entered", self.label);
    }

    fn pause(&mut self) {
        info!("{} paused", self.label);
    }
}

pub fn run(args: PreviewArgs) -> Result<()> {
    let kind: TransitionKind = args.kind.parse()?;
    let transition = TransitionConfig::new(kind, args.time)
        .with_direction(args.direction)
        .with_easing(args.easing.as_str())
        .build()?;
    if args.dt < MIN_DT_MS {
        return Err(anyhow!("--dt must be at least {MIN_DT_MS} ms"));
    }

    let mut director = Director::new(DisplayList::new(Viewport::default()));
    let below = director.add("below", Placeholder::boxed("below"))?;
    let above = director.add("above", Placeholder::boxed("above"))?;

    director.push("below");
    println!("Pushing 'above' over 'below' with {} ({} ms)", kind.as_str(), args.time);
    director.push_with("above", transition);

    let mut clock = FrameClock::new();
    print_frame(&director, 0.0, below, above);
    play_through(&mut director, &mut clock, args.dt, |d, t_ms| {
        print_frame(d, t_ms, below, above)
    });

    println!(
        "Done: current={:?} below paused={:?}",
        director.current_scene(),
        director.is_paused(below)
    );
    Ok(())
}

/// Tick until the in-flight transition completes, calling `on_frame` after
/// each tick. The clock may clamp long steps, so the frame count is not
/// known up front. Returns the number of frames ticked.
fn play_through<T: RenderTree>(
    director: &mut Director<T>,
    clock: &mut FrameClock,
    dt_ms: f32,
    mut on_frame: impl FnMut(&Director<T>, f64),
) -> u32 {
    let mut frames = 0;
    while director.in_transition() {
        let dt = clock.advance(dt_ms);
        director.update(dt);
        frames += 1;
        on_frame(director, clock.total_ms);
    }
    frames
}

fn print_frame(director: &Director<DisplayList>, t_ms: f64, below: NodeId, above: NodeId) {
    let tree = director.tree();
    let describe = |node: NodeId| match (tree.props(node), tree.child_index(node)) {
        (Some(p), Some(z)) => format!(
            "z={z} pos=({:>7.1},{:>7.1}) scale={:.2} alpha={:.2}",
            p.position.x, p.position.y, p.scale.x, p.alpha
        ),
        _ => "detached".to_string(),
    };
    println!(
        "  t={:>7.1}  below: {}  |  above: {}",
        t_ms,
        describe(below),
        describe(above)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use tableau_director::transition::Fade;

    #[test]
    fn long_steps_still_run_to_completion() {
        let mut director = Director::new(DisplayList::new(Viewport::default()));
        let below = director.add("below", Placeholder::boxed("below")).unwrap();
        director.add("above", Placeholder::boxed("above")).unwrap();
        director.push("below");
        director.push_with("above", Box::new(Fade::fade_in_out(1000.0)));

        // 1000 ms steps are clamped to 250 ms by the clock
        let mut clock = FrameClock::new();
        let mut times = Vec::new();
        let frames = play_through(&mut director, &mut clock, 1000.0, |_, t| times.push(t));

        assert_eq!(frames, 4);
        assert_eq!(times, vec![250.0, 500.0, 750.0, 1000.0]);
        assert!(!director.in_transition());
        assert_eq!(director.is_paused(below), Some(true));
    }

    #[test]
    fn zero_time_transition_needs_no_frames() {
        let mut director = Director::new(DisplayList::new(Viewport::default()));
        director.add("below", Placeholder::boxed("below")).unwrap();
        director.add("above", Placeholder::boxed("above")).unwrap();
        director.push("below");
        director.push_with("above", Box::new(Fade::fade_in(0.0)));

        let mut clock = FrameClock::new();
        assert_eq!(play_through(&mut director, &mut clock, 16.0, |_, _| {}), 0);
    }
}
