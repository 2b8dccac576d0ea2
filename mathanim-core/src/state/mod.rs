//! # State
//!
//! The objects commands operate on, and the reference store that holds them.

pub mod object;
pub mod scene;

pub use object::{AnimObject, PropertyKind};
pub use scene::{Location, Scene, TargetError};
