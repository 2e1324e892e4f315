//! Transition effects used when the director swaps scenes
//!
//! A transition animates node properties of the outgoing and incoming
//! scenes over `time_ms`. The director calls [`Transition::start`] once,
//! [`Transition::advance`] every frame until it reports completion, and
//! [`Transition::complete`] when it has to force-finish an in-flight swap.

mod config;
mod fade;
mod scale;
mod slide;

pub use config::{TransitionConfig, TransitionKind};
pub use fade::Fade;
pub use scale::Scale;
pub use slide::{Slide, SlideMode};

use crate::render_tree::RenderTree;
use serde::{Deserialize, Serialize};
use tableau_core::easing::{self, Easing};
use tableau_core::{NodeId, NodeProps, Vec2, Viewport};

/// A timed animation between two scenes.
pub trait Transition {
    /// Begin animating. `outgoing` is `None` when the stack was empty.
    fn start(&mut self, tree: &mut dyn RenderTree, outgoing: Option<NodeId>, incoming: NodeId);

    /// Advance by `dt_ms`. Returns true once the animation has reached its
    /// final values.
    fn advance(&mut self, tree: &mut dyn RenderTree, dt_ms: f32) -> bool;

    /// Snap every animated property to its final value.
    fn complete(&mut self, tree: &mut dyn RenderTree);

    /// Whether the incoming scene must be drawn above the outgoing one
    /// while the animation runs.
    fn incoming_on_top(&self) -> bool {
        true
    }

    fn name(&self) -> &str;
}

/// Direction of motion for move and scroll transitions (screen space, y down)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Up,
    Down,
    #[default]
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Displacement covering one full viewport extent in this direction
    pub fn offset(self, viewport: Viewport) -> Vec2 {
        let (dx, dy) = match self {
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::Right => (1.0, 0.0),
            Direction::UpLeft => (-1.0, -1.0),
            Direction::UpRight => (1.0, -1.0),
            Direction::DownLeft => (-1.0, 1.0),
            Direction::DownRight => (1.0, 1.0),
        };
        Vec2::new(dx * viewport.width, dy * viewport.height)
    }
}

/// Which scene a fade or scale effect animates.
///
/// `InOut` is sequenced: the outgoing scene animates during the first half
/// of the time, the incoming one during the second half.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sequence {
    In,
    Out,
    InOut,
}

/// Elapsed-time bookkeeping shared by every effect
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    pub duration_ms: f32,
    pub elapsed_ms: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(duration_ms: f32, easing: Easing) -> Self {
        Self {
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            easing,
        }
    }

    pub fn reset(&mut self) {
        self.elapsed_ms = 0.0;
    }

    /// Advance and return normalized time in `[0, 1]`
    pub fn step(&mut self, dt_ms: f32) -> f32 {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms);
        self.normalized()
    }

    pub fn finish(&mut self) {
        self.elapsed_ms = self.duration_ms;
    }

    pub fn normalized(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            self.elapsed_ms / self.duration_ms
        }
    }

    pub fn is_done(&self) -> bool {
        self.elapsed_ms >= self.duration_ms
    }

    /// Eased value of `t`, exact at both endpoints
    pub fn ease(&self, t: f32) -> f32 {
        if t <= 0.0 {
            0.0
        } else if t >= 1.0 {
            1.0
        } else {
            (self.easing)(t)
        }
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(0.0, easing::linear)
    }
}

/// Splits normalized time at the midpoint into `(first_half, second_half)`
/// phase times, each in `[0, 1]`.
pub fn split_halves(t: f32) -> (f32, f32) {
    ((t * 2.0).clamp(0.0, 1.0), ((t - 0.5) * 2.0).clamp(0.0, 1.0))
}

pub(crate) fn update_props(
    tree: &mut dyn RenderTree,
    node: Option<NodeId>,
    f: impl FnOnce(&mut NodeProps),
) {
    if let Some(node) = node {
        if let Some(props) = tree.props_mut(node) {
            f(props);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tween_zero_duration_is_done() {
        let mut tween = Tween::new(0.0, easing::linear);
        assert!(tween.is_done());
        assert_eq!(tween.step(0.0), 1.0);
    }

    #[test]
    fn tween_clamps_to_duration() {
        let mut tween = Tween::new(100.0, easing::linear);
        assert!((tween.step(40.0) - 0.4).abs() < 1e-6);
        assert!(!tween.is_done());
        assert_eq!(tween.step(500.0), 1.0);
        assert!(tween.is_done());
    }

    #[test]
    fn ease_is_exact_at_endpoints() {
        let tween = Tween::new(100.0, easing::back_out);
        assert_eq!(tween.ease(0.0), 0.0);
        assert_eq!(tween.ease(1.0), 1.0);
        assert_eq!(tween.ease(2.0), 1.0);
    }

    #[test]
    fn split_halves_midpoint() {
        assert_eq!(split_halves(0.0), (0.0, 0.0));
        assert_eq!(split_halves(0.25), (0.5, 0.0));
        assert_eq!(split_halves(0.5), (1.0, 0.0));
        assert_eq!(split_halves(0.75), (1.0, 0.5));
        assert_eq!(split_halves(1.0), (1.0, 1.0));
    }

    #[test]
    fn diagonal_offsets_cover_viewport() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(Direction::DownRight.offset(vp), Vec2::new(800.0, 600.0));
        assert_eq!(Direction::UpLeft.offset(vp), Vec2::new(-800.0, -600.0));
        assert_eq!(Direction::Up.offset(vp), Vec2::new(0.0, -600.0));
    }
}
