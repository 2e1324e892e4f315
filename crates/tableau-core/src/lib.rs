//! Tableau Core - Foundational types for the Tableau scene toolkit
//!
//! This crate provides the types that all other Tableau crates depend on:
//! - `NodeId` - Handles for nodes living in a host render tree
//! - `Vec2`, `NodeProps` - 2D spatial types and animatable node properties
//! - `easing` - Easing functions passed explicitly to transitions
//! - Error types and Result alias

pub mod easing;
mod error;
mod id;
mod types;

pub use easing::Easing;
pub use error::{Result, TableauError};
pub use id::NodeId;
pub use types::{NodeProps, Vec2, Viewport};
