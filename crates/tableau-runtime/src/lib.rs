//! Tableau Runtime - Frame loop infrastructure
//!
//! Provides the building blocks a host render loop drives once per frame:
//! - `FrameClock` - millisecond frame deltas with a catch-up clamp
//! - `FrameSystem` - trait for anything ticked with `update(dt_ms)`
//! - `SystemSchedule` - ordered list of systems ticked together

mod clock;
mod schedule;
mod system;

pub use clock::FrameClock;
pub use schedule::SystemSchedule;
pub use system::FrameSystem;
