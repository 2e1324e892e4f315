//! Frame system trait

use tableau_core::Result;

/// A system that can be ticked by the host's frame loop
///
/// Systems are updated in registration order, once per frame, with the
/// elapsed time since the previous frame in milliseconds.
pub trait FrameSystem {
    /// Called once per frame
    fn update(&mut self, dt_ms: f32) -> Result<()>;

    /// Human-readable name for this system
    fn name(&self) -> &str;
}
