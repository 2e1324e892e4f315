//! Opacity transitions

use super::{split_halves, update_props, Sequence, Transition, Tween};
use crate::render_tree::RenderTree;
use tableau_core::easing::{self, lerp, Easing};
use tableau_core::NodeId;

/// Interpolates opacity between 0 and 1.
pub struct Fade {
    sequence: Sequence,
    tween: Tween,
    outgoing: Option<NodeId>,
    incoming: Option<NodeId>,
}

impl Fade {
    pub fn new(sequence: Sequence, time_ms: f32, easing: Easing) -> Self {
        Self {
            sequence,
            tween: Tween::new(time_ms, easing),
            outgoing: None,
            incoming: None,
        }
    }

    pub fn fade_in(time_ms: f32) -> Self {
        Self::new(Sequence::In, time_ms, easing::linear)
    }

    pub fn fade_out(time_ms: f32) -> Self {
        Self::new(Sequence::Out, time_ms, easing::linear)
    }

    /// Outgoing fades out over the first half, incoming fades in over the second
    pub fn fade_in_out(time_ms: f32) -> Self {
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
        if let Some(t) = out_t {
            let alpha = lerp(1.0, 0.0, self.tween.ease(t));
            update_props(tree, self.outgoing, |props| props.alpha = alpha);
        }
        if let Some(t) = in_t {
            let alpha = lerp(0.0, 1.0, self.tween.ease(t));
            update_props(tree, self.incoming, |props| props.alpha = alpha);
        }
    }
}

impl Transition for Fade {
    fn start(&mut self, tree: &mut dyn RenderTree, outgoing: Option<NodeId>, incoming: NodeId) {
        self.outgoing = outgoing;
        self.incoming = Some(incoming);
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
            Sequence::In => "fade_in",
            Sequence::Out => "fade_out",
            Sequence::InOut => "fade_in_out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_tree::DisplayList;

    fn alpha(tree: &DisplayList, node: NodeId) -> f32 {
        tree.props(node).unwrap().alpha
    }

    #[test]
    fn fade_in_out_switches_at_midpoint() {
        let (a, b) = (NodeId::new(), NodeId::new());
        let mut tree = DisplayList::default();
        tree.add_child(a);
        tree.add_child(b);

        let mut fade = Fade::fade_in_out(400.0);
        fade.start(&mut tree, Some(a), b);
        assert_eq!(alpha(&tree, a), 1.0);
        assert_eq!(alpha(&tree, b), 0.0);

        fade.advance(&mut tree, 100.0);
        assert!((alpha(&tree, a) - 0.5).abs() < 1e-5);
        assert_eq!(alpha(&tree, b), 0.0);

        fade.advance(&mut tree, 100.0);
        assert_eq!(alpha(&tree, a), 0.0);
        assert_eq!(alpha(&tree, b), 0.0);

        fade.advance(&mut tree, 100.0);
        assert!((alpha(&tree, b) - 0.5).abs() < 1e-5);

        assert!(fade.advance(&mut tree, 100.0));
        assert_eq!(alpha(&tree, b), 1.0);
    }

    #[test]
    fn fade_out_leaves_incoming_alone() {
        let (a, b) = (NodeId::new(), NodeId::new());
        let mut tree = DisplayList::default();
        tree.add_child(b);
        tree.add_child(a);

        let mut fade = Fade::fade_out(200.0).with_easing(easing::quad_in);
        assert!(!fade.incoming_on_top());
        fade.start(&mut tree, Some(a), b);
        fade.advance(&mut tree, 100.0);
        assert!((alpha(&tree, a) - 0.75).abs() < 1e-5);
        assert_eq!(alpha(&tree, b), 1.0);
    }

    #[test]
    fn complete_snaps_final_alpha() {
        let (a, b) = (NodeId::new(), NodeId::new());
        let mut tree = DisplayList::default();
        tree.add_child(a);
        tree.add_child(b);

        let mut fade = Fade::fade_in(1000.0);
        fade.start(&mut tree, Some(a), b);
        fade.advance(&mut tree, 1.0);
        fade.complete(&mut tree);
        assert_eq!(alpha(&tree, b), 1.0);
        assert_eq!(alpha(&tree, a), 1.0);
    }
}
