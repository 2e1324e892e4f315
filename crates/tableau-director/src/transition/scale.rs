//! Zoom transitions, scaling about the viewport center

use super::{split_halves, update_props, Sequence, Transition, Tween};
use crate::render_tree::RenderTree;
use tableau_core::easing::{self, lerp, Easing};
use tableau_core::{NodeId, NodeProps, Vec2};

/// Interpolates scale between 0 and 1, re-centering the node so it grows
/// from (or shrinks into) the middle of the viewport.
pub struct Scale {
    sequence: Sequence,
    tween: Tween,
    center: Vec2,
    outgoing: Option<NodeId>,
    incoming: Option<NodeId>,
}

impl Scale {
    pub fn new(sequence: Sequence, time_ms: f32, easing: Easing) -> Self {
        Self {
            sequence,
            tween: Tween::new(time_ms, easing),
            center: Vec2::ZERO,
            outgoing: None,
            incoming: None,
        }
    }

    pub fn scale_in(time_ms: f32) -> Self {
        Self::new(Sequence::In, time_ms, easing::linear)
    }

    pub fn scale_out(time_ms: f32) -> Self {
        Self::new(Sequence::Out, time_ms, easing::linear)
    }

    pub fn scale_in_out(time_ms: f32) -> Self {
        Self::new(Sequence::InOut, time_ms, easing::linear)
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.tween.easing = easing;
        self
    }

    fn apply(&self, tree: &mut dyn RenderTree, t: f32) {
        let (out_t, in_t) = match self.sequence {
            Sequence::In => (None, Some(t)),
            Sequence::Out => (Some(t), None),
            Sequence::InOut => {
                let (first, second) = split_halves(t);
                (Some(first), Some(second))
            }
        };
        let center = self.center;
        if let Some(t) = out_t {
            let s = lerp(1.0, 0.0, self.tween.ease(t));
            update_props(tree, self.outgoing, |props| set_centered_scale(props, s, center));
        }
        if let Some(t) = in_t {
            let s = lerp(0.0, 1.0, self.tween.ease(t));
            update_props(tree, self.incoming, |props| set_centered_scale(props, s, center));
        }
    }
}

fn set_centered_scale(props: &mut NodeProps, s: f32, center: Vec2) {
    props.scale = Vec2::new(s, s);
    props.position = center * (1.0 - s);
}

impl Transition for Scale {
    fn start(&mut self, tree: &mut dyn RenderTree, outgoing: Option<NodeId>, incoming: NodeId) {
        self.outgoing = outgoing;
        self.incoming = Some(incoming);
        self.center = tree.viewport().center();
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
        self.sequence != Sequence::Out
    }

    fn name(&self) -> &str {
        match self.sequence {
            Sequence::In => "scale_in",
            Sequence::Out => "scale_out",
            Sequence::InOut => "scale_in_out",
        }
    }
}
