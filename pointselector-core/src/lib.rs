//! Core data structures for pointselector
//!
//! This crate provides the fundamental types shared by the landmark session
//! crates: point aliases, surface models, the discovered model list, point
//! sets (markups) and landmark log records.

pub mod point;
pub mod mesh;
pub mod model;
pub mod point_set;
pub mod landmark;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use model::*;
pub use point_set::*;
pub use landmark::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3};
