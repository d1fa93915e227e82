//! Core data structures and traits for lodkit
//!
//! This crate provides the fundamental types shared by the slicing and LOD
//! crates: triangle meshes, object transforms, bounds queries and the common
//! error type.

pub mod point;
pub mod mesh;
pub mod traits;
pub mod transform;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use traits::*;
pub use transform::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point3, Vector3, Matrix4};
