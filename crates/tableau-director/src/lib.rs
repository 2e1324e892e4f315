//! Tableau Director - Scene stack with animated transitions
//!
//! The director owns an ordered stack of scene entities and mediates
//! `push` / `replace` / `pop` against an optional [`Transition`]:
//! - `RenderTree` - the host render-tree boundary (membership, z-order, node properties)
//! - `SceneEntity` - lifecycle hooks a scene implements
//! - `Director` - the scene-stack state machine
//! - `transition` - move, scroll, fade and scale effects plus TOML config

mod director;
mod entity;
mod render_tree;
pub mod transition;

pub use director::Director;
pub use entity::{SceneEntity, SceneRef};
pub use render_tree::{DisplayList, RenderTree};
pub use transition::{Direction, Transition, TransitionConfig, TransitionKind};
