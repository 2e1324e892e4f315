//! Move-in, move-out and scroll transitions

use super::{update_props, Direction, Transition, Tween};
use crate::render_tree::RenderTree;
use tableau_core::easing::{self, Easing};
use tableau_core::{NodeId, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideMode {
    /// Incoming scene slides in over the outgoing one
    In,
    /// Outgoing scene slides away, revealing the incoming one beneath
    Out,
    /// Both scenes move together
    Scroll,
}

/// Translates one or both scenes by a full viewport extent.
pub struct Slide {
    mode: SlideMode,
    direction: Direction,
    tween: Tween,
    offset: Vec2,
    outgoing: Option<NodeId>,
    incoming: Option<NodeId>,
}

impl Slide {
    pub fn new(mode: SlideMode, direction: Direction, time_ms: f32, easing: Easing) -> Self {
        Self {
            mode,
            direction,
            tween: Tween::new(time_ms, easing),
            offset: Vec2::ZERO,
            outgoing: None,
            incoming: None,
        }
    }

    pub fn move_in(direction: Direction, time_ms: f32) -> Self {
        Self::new(SlideMode::In, direction, time_ms, easing::linear)
    }

    pub fn move_out(direction: Direction, time_ms: f32) -> Self {
        Self::new(SlideMode::Out, direction, time_ms, easing::linear)
    }

    pub fn scroll(direction: Direction, time_ms: f32) -> Self {
        Self::new(SlideMode::Scroll, direction, time_ms, easing::linear)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.tween.easing = easing;
        self
    }

    fn apply(&self, tree: &mut dyn RenderTree, t: f32) {
        let p = self.tween.ease(t);
        let offset = self.offset;
        // Incoming travels from the opposite edge to the origin
        if matches!(self.mode, SlideMode::In | SlideMode::Scroll) {
            update_props(tree, self.incoming, |props| {
                props.position = (offset * -1.0).lerp(Vec2::ZERO, p);
            });
        }
        if matches!(self.mode, SlideMode::Out | SlideMode::Scroll) {
            update_props(tree, self.outgoing, |props| {
                props.position = Vec2::ZERO.lerp(offset, p);
            });
        }
    }
}

impl Transition for Slide {
    fn start(&mut self, tree: &mut dyn RenderTree, outgoing: Option<NodeId>, incoming: NodeId) {
        self.outgoing = outgoing;
        self.incoming = Some(incoming);
        self.offset = self.direction.offset(tree.viewport());
        self.tween.reset();
        self.apply(tree, 0.0);
    }

    fn advance(&mut self, tree: &mut dyn RenderTree, dt_ms: f32) -> bool {
        let t = self.tween.step(dt_ms);
        self.apply(tree, t);
        self.tween.is_done()
    }

    fn complete(&mut self, tree: &mut dyn RenderTree) {
        self.tween.finish();
        self.apply(tree, 1.0);
    }

    fn incoming_on_top(&self) -> bool {
        self.mode != SlideMode::Out
    }

    fn name(&self) -> &str {
        match self.mode {
            SlideMode::In => "move_in",
            SlideMode::Out => "move_out",
            SlideMode::Scroll => "scroll",
        }
    }
}
