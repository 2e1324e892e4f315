//! Scene director: a stack of scenes swapped through timed transitions.
//!
//! Each stack operation runs in two halves. The first half happens inside
//! the call: pre-hooks fire and the incoming node is spliced into the render
//! tree at its final z-order. The second half (post-hooks, `current` index
//! update, removal of the outgoing node) runs when the transition reports
//! completion from [`Director::update`], or immediately when no transition
//! is given. Only one transition is ever in flight; any stack operation
//! issued while one is running force-completes it first.

use crate::entity::{SceneEntity, SceneRef};
use crate::render_tree::RenderTree;
use crate::transition::Transition;
use log::{debug, warn};
use std::collections::HashMap;
use tableau_core::{NodeId, NodeProps, Result, TableauError};
use tableau_runtime::FrameSystem;

/// Per-scene bookkeeping. The director is the only writer of `paused`.
struct SceneSlot {
    entity: Box<dyn SceneEntity>,
    paused: bool,
    started: bool,
}

/// Second half of a stack operation, run exactly once
#[derive(Debug, Clone, Copy)]
enum PendingOp {
    Replace {
        outgoing: Option<NodeId>,
        incoming: NodeId,
    },
    Push {
        outgoing: Option<NodeId>,
        incoming: NodeId,
    },
    Pop {
        outgoing: NodeId,
        incoming: NodeId,
    },
}

impl PendingOp {
    fn nodes(&self) -> (Option<NodeId>, NodeId) {
        match *self {
            PendingOp::Replace { outgoing, incoming } | PendingOp::Push { outgoing, incoming } => {
                (outgoing, incoming)
            }
            PendingOp::Pop { outgoing, incoming } => (Some(outgoing), incoming),
        }
    }
}

struct InFlight {
    transition: Box<dyn Transition>,
    op: PendingOp,
}

/// Scene stack state machine.
///
/// Scenes are owned by the director and addressed by their render-tree
/// [`NodeId`] or by a registered name. Insertion order in the stack is the
/// z-order in the render tree.
pub struct Director<T: RenderTree> {
    tree: T,
    scenes: HashMap<NodeId, SceneSlot>,
    names: HashMap<String, NodeId>,
    stack: Vec<NodeId>,
    current: Option<usize>,
    in_flight: Option<InFlight>,
}

impl<T: RenderTree> Director<T> {
    pub fn new(tree: T) -> Self {
        Self {
            tree,
            scenes: HashMap::new(),
            names: HashMap::new(),
            stack: Vec::new(),
            current: None,
            in_flight: None,
        }
    }

    // ── Registry ──

    /// Hand an anonymous scene to the director. It is dropped once it exits.
    pub fn insert(&mut self, entity: Box<dyn SceneEntity>) -> Result<NodeId> {
        let node = entity.node();
        if self.scenes.contains_key(&node) {
            return Err(TableauError::DuplicateScene(node.to_string()));
        }
        self.scenes.insert(
            node,
            SceneSlot {
                entity,
                paused: false,
                started: false,
            },
        );
        Ok(node)
    }

    /// Register a scene under `name`. Named scenes survive exit and can be
    /// pushed again.
    pub fn add(&mut self, name: &str, entity: Box<dyn SceneEntity>) -> Result<NodeId> {
        if name.is_empty() {
            return Err(TableauError::MissingIdentifier("scene name".to_string()));
        }
        if self.names.contains_key(name) {
            return Err(TableauError::DuplicateScene(name.to_string()));
        }
        let node = self.insert(entity)?;
        self.names.insert(name.to_string(), node);
        debug!("Registered scene '{name}' as {node}");
        Ok(node)
    }

    /// Unregister `name`. A scene that is not on the stack is dropped.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(node) = self.names.remove(name) else {
            return false;
        };
        if !self.stack.contains(&node) {
            self.scenes.remove(&node);
        }
        true
    }

    /// Resolve a reference. Node references pass through unchanged.
    pub fn get(&self, target: impl Into<SceneRef>) -> Option<NodeId> {
        match target.into() {
            SceneRef::Node(node) => Some(node),
            SceneRef::Name(name) => self.names.get(&name).copied(),
        }
    }

    pub fn scene(&self, node: NodeId) -> Option<&dyn SceneEntity> {
        self.scenes.get(&node).map(|slot| slot.entity.as_ref())
    }

    pub fn scene_mut(&mut self, node: NodeId) -> Option<&mut (dyn SceneEntity + 'static)> {
        self.scenes.get_mut(&node).map(|slot| slot.entity.as_mut())
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.scenes.contains_key(&node)
    }

    // ── Stack operations ──

    /// Swap the current scene for `target`. The outgoing scene exits and
    /// leaves the stack once the swap completes.
    pub fn replace(&mut self, target: impl Into<SceneRef>) -> bool {
        self.replace_inner(target.into(), None)
    }

    pub fn replace_with(
        &mut self,
        target: impl Into<SceneRef>,
        transition: Box<dyn Transition>,
    ) -> bool {
        self.replace_inner(target.into(), Some(transition))
    }

    /// Push `target` over the current scene, which is paused (but stays in
    /// the render tree) once the push completes.
    pub fn push(&mut self, target: impl Into<SceneRef>) -> bool {
        self.push_inner(target.into(), None)
    }

    pub fn push_with(&mut self, target: impl Into<SceneRef>, transition: Box<dyn Transition>) -> bool {
        self.push_inner(target.into(), Some(transition))
    }

    /// Exit the current scene and resume the one beneath it.
    /// Returns false when there is no scene beneath.
    pub fn pop(&mut self) -> bool {
        self.pop_inner(None)
    }

    pub fn pop_with(&mut self, transition: Box<dyn Transition>) -> bool {
        self.pop_inner(Some(transition))
    }

    /// Exit every scene, top first. Returns false if the stack was empty.
    pub fn pop_all(&mut self) -> bool {
        self.force_complete();
        if self.stack.is_empty() {
            return false;
        }
        let removed: Vec<NodeId> = self.stack.drain(..).rev().collect();
        self.current = None;
        for node in removed {
            self.with_scene(node, |e| e.pre_exit());
            self.exit_scene(node);
        }
        debug!("Popped all scenes");
        true
    }

    /// Exit every scene except the bottom one, which becomes current and is
    /// resumed if it was paused. Returns false if nothing was removed.
    pub fn pop_all_but_one(&mut self) -> bool {
        self.force_complete();
        if self.stack.len() < 2 {
            return false;
        }
        let removed: Vec<NodeId> = self.stack.drain(1..).rev().collect();
        self.current = Some(0);
        for node in removed {
            self.with_scene(node, |e| e.pre_exit());
            self.exit_scene(node);
        }

        let bottom = self.stack[0];
        if self.scenes.get(&bottom).is_some_and(|slot| slot.paused) {
            self.with_scene(bottom, |e| e.pre_resume());
            self.reset_props(bottom);
            self.resume_scene(bottom);
        }
        debug!("Popped all scenes but {bottom}");
        true
    }

    // ── Queries ──

    pub fn current_scene(&self) -> Option<NodeId> {
        self.current.and_then(|i| self.stack.get(i).copied())
    }

    pub fn previous_scene(&self) -> Option<NodeId> {
        self.current
            .and_then(|i| i.checked_sub(1))
            .and_then(|i| self.stack.get(i).copied())
    }

    /// The scene above current. Only set while a transition is pending.
    pub fn next_scene(&self) -> Option<NodeId> {
        let next = self.current.map_or(0, |i| i + 1);
        self.stack.get(next).copied()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Stack contents, bottom to top
    pub fn stack(&self) -> &[NodeId] {
        &self.stack
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn in_transition(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn is_paused(&self, node: NodeId) -> Option<bool> {
        self.scenes.get(&node).map(|slot| slot.paused)
    }

    pub fn is_started(&self, node: NodeId) -> Option<bool> {
        self.scenes.get(&node).map(|slot| slot.started)
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    // ── Frame update ──

    /// Advance the in-flight transition, then update every unpaused scene on
    /// the stack. Scenes are filtered by their paused flag only, not by
    /// position, so unpaused scenes beneath the current one keep updating.
    pub fn update(&mut self, dt_ms: f32) {
        let finished = match self.in_flight.as_mut() {
            Some(flight) => flight.transition.advance(&mut self.tree, dt_ms),
            None => false,
        };
        if finished {
            if let Some(flight) = self.in_flight.take() {
                debug!("Transition {} finished", flight.transition.name());
                self.finish(flight.op);
            }
        }

        for node in &self.stack {
            if let Some(slot) = self.scenes.get_mut(node) {
                if !slot.paused {
                    slot.entity.update(dt_ms);
                }
            }
        }
    }

    /// Force the in-flight transition to its final state and run its
    /// completion. No-op when idle.
    pub fn force_complete(&mut self) {
        if let Some(mut flight) = self.in_flight.take() {
            debug!("Force-completing transition {}", flight.transition.name());
            flight.transition.complete(&mut self.tree);
            self.finish(flight.op);
        }
    }

    // ── Internals ──

    fn resolve(&self, target: &SceneRef) -> Option<NodeId> {
        let node = match target {
            SceneRef::Node(node) => Some(*node),
            SceneRef::Name(name) => self.names.get(name).copied(),
        };
        match node {
            Some(node) if self.scenes.contains_key(&node) => Some(node),
            _ => {
                warn!("Unknown scene {target}, ignoring");
                None
            }
        }
    }

    fn replace_inner(&mut self, target: SceneRef, transition: Option<Box<dyn Transition>>) -> bool {
        let Some(incoming) = self.resolve(&target) else {
            return false;
        };
        if self.current_scene() == Some(incoming) {
            return false;
        }
        self.force_complete();
        if self.current_scene() == Some(incoming) {
            return false;
        }

        let outgoing = self.current_scene();
        if let Some(out) = outgoing {
            self.with_scene(out, |e| e.pre_exit());
        }
        self.detach_stale(incoming);

        match outgoing.and_then(|out| self.tree.child_index(out)) {
            Some(index) => self.tree.add_child_at(incoming, index + 1),
            None => self.tree.add_child(incoming),
        }
        self.reset_props(incoming);
        let slot = self.current.map_or(0, |i| i + 1);
        self.stack.insert(slot, incoming);
        self.with_scene(incoming, |e| e.pre_enter());

        debug!("Replacing {outgoing:?} with {incoming}");
        self.run(PendingOp::Replace { outgoing, incoming }, transition);
        true
    }

    fn push_inner(&mut self, target: SceneRef, transition: Option<Box<dyn Transition>>) -> bool {
        let Some(incoming) = self.resolve(&target) else {
            return false;
        };
        if self.current_scene() == Some(incoming) {
            return false;
        }
        self.force_complete();
        if self.current_scene() == Some(incoming) {
            return false;
        }

        let outgoing = self.current_scene();
        if let Some(out) = outgoing {
            self.with_scene(out, |e| e.pre_pause());
        }
        self.detach_stale(incoming);

        self.tree.add_child(incoming);
        self.reset_props(incoming);
        self.stack.push(incoming);
        self.with_scene(incoming, |e| e.pre_enter());

        debug!("Pushing {incoming} over {outgoing:?}");
        self.run(PendingOp::Push { outgoing, incoming }, transition);
        true
    }

    fn pop_inner(&mut self, transition: Option<Box<dyn Transition>>) -> bool {
        self.force_complete();
        let (Some(outgoing), Some(incoming)) = (self.current_scene(), self.previous_scene()) else {
            return false;
        };

        self.with_scene(outgoing, |e| e.pre_exit());
        self.with_scene(incoming, |e| e.pre_resume());
        self.reset_props(incoming);

        debug!("Popping {outgoing}, resuming {incoming}");
        self.run(PendingOp::Pop { outgoing, incoming }, transition);
        true
    }

    /// Drop an earlier occurrence of `node` from the stack and render tree
    fn detach_stale(&mut self, node: NodeId) {
        let Some(pos) = self.stack.iter().position(|&n| n == node) else {
            return;
        };
        self.stack.remove(pos);
        self.tree.remove_child(node);
        if let Some(current) = self.current {
            if pos < current {
                self.current = Some(current - 1);
            }
        }
        if let Some(slot) = self.scenes.get_mut(&node) {
            slot.paused = false;
        }
        debug!("Moved {node} out of stack slot {pos}");
    }

    fn run(&mut self, op: PendingOp, transition: Option<Box<dyn Transition>>) {
        let Some(mut transition) = transition else {
            self.finish(op);
            return;
        };

        let (outgoing, incoming) = op.nodes();
        if let Some(out) = outgoing {
            self.order_pair(out, incoming, transition.incoming_on_top());
        }
        transition.start(&mut self.tree, outgoing, incoming);
        debug!("Transition {} started", transition.name());

        if transition.advance(&mut self.tree, 0.0) {
            self.finish(op);
        } else {
            self.in_flight = Some(InFlight { transition, op });
        }
    }

    /// Make `incoming` draw directly above (or below) `outgoing`. Other
    /// children keep their relative order.
    fn order_pair(&mut self, outgoing: NodeId, incoming: NodeId, incoming_on_top: bool) {
        let (Some(o), Some(i)) = (self.tree.child_index(outgoing), self.tree.child_index(incoming))
        else {
            return;
        };
        let wrong_side = (incoming_on_top && i < o) || (!incoming_on_top && i > o);
        if !wrong_side {
            return;
        }
        if o.abs_diff(i) == 1 {
            self.tree.swap_children_at(o, i);
        } else {
            // Detaching `incoming` from below shifts `outgoing` down by one,
            // so index `o` lands just above it; from above, just below it
            self.tree.add_child_at(incoming, o);
        }
    }

    fn finish(&mut self, op: PendingOp) {
        match op {
            PendingOp::Replace { outgoing, incoming } => {
                if let Some(out) = outgoing {
                    if let Some(pos) = self.stack.iter().position(|&n| n == out) {
                        self.stack.remove(pos);
                    }
                    self.exit_scene(out);
                }
                self.current = self.stack.iter().position(|&n| n == incoming);
                self.enter_scene(incoming);
            }
            PendingOp::Push { outgoing, incoming } => {
                if let Some(out) = outgoing {
                    if let Some(slot) = self.scenes.get_mut(&out) {
                        slot.paused = true;
                        slot.entity.pause();
                    }
                    self.order_pair(out, incoming, true);
                    self.reset_props(out);
                }
                self.current = self.stack.iter().position(|&n| n == incoming);
                self.enter_scene(incoming);
            }
            PendingOp::Pop { outgoing, incoming } => {
                if let Some(pos) = self.stack.iter().position(|&n| n == outgoing) {
                    self.stack.remove(pos);
                }
                self.exit_scene(outgoing);
                self.current = self.stack.iter().position(|&n| n == incoming);
                self.resume_scene(incoming);
            }
        }
    }

    fn enter_scene(&mut self, node: NodeId) {
        if let Some(slot) = self.scenes.get_mut(&node) {
            slot.paused = false;
            slot.started = true;
            slot.entity.enter();
        }
    }

    fn resume_scene(&mut self, node: NodeId) {
        if let Some(slot) = self.scenes.get_mut(&node) {
            slot.paused = false;
            slot.entity.resume();
        }
    }

    /// Run `exit`, detach from the render tree, and drop anonymous scenes
    fn exit_scene(&mut self, node: NodeId) {
        if let Some(slot) = self.scenes.get_mut(&node) {
            slot.entity.exit();
            slot.paused = false;
            slot.started = false;
        }
        self.tree.remove_child(node);
        if !self.names.values().any(|&n| n == node) {
            self.scenes.remove(&node);
        }
    }

    fn reset_props(&mut self, node: NodeId) {
        if let Some(props) = self.tree.props_mut(node) {
            *props = NodeProps::IDENTITY;
        }
    }

    fn with_scene(&mut self, node: NodeId, f: impl FnOnce(&mut dyn SceneEntity)) {
        if let Some(slot) = self.scenes.get_mut(&node) {
            f(slot.entity.as_mut());
        }
    }
}

impl<T: RenderTree> FrameSystem for Director<T> {
    fn update(&mut self, dt_ms: f32) -> Result<()> {
        Director::update(self, dt_ms);
        Ok(())
    }

    fn name(&self) -> &str {
        "director"
    }
}
