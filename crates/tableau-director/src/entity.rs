//! Scene entity hooks and references

use tableau_core::NodeId;

/// A scene managed by the [`Director`](crate::Director).
///
/// The director only ever calls these hooks; everything a scene draws lives
/// in the host render tree under [`SceneEntity::node`]. All hooks default to
/// no-ops.
pub trait SceneEntity {
    /// The render-tree node this scene is drawn as
    fn node(&self) -> NodeId;

    fn pre_enter(&mut self) {}
    fn enter(&mut self) {}
    fn pre_pause(&mut self) {}
    fn pause(&mut self) {}
    fn pre_resume(&mut self) {}
    fn resume(&mut self) {}
    fn pre_exit(&mut self) {}
    fn exit(&mut self) {}

    /// Called every frame while the scene is on the stack and not paused
    fn update(&mut self, _dt_ms: f32) {}
}

/// Addresses a scene either by node or by registered name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneRef {
    Node(NodeId),
    Name(String),
}

impl From<NodeId> for SceneRef {
    fn from(id: NodeId) -> Self {
        SceneRef::Node(id)
    }
}

impl From<&str> for SceneRef {
    fn from(name: &str) -> Self {
        SceneRef::Name(name.to_string())
    }
}

impl From<String> for SceneRef {
    fn from(name: String) -> Self {
        SceneRef::Name(name)
    }
}

impl std::fmt::Display for SceneRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneRef::Node(id) => write!(f, "{id}"),
            SceneRef::Name(name) => write!(f, "'{name}'"),
        }
    }
}
