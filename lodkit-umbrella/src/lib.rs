//! # lodkit
//!
//! Level-of-detail generation and grid slicing for triangle meshes.
//!
//! This is the umbrella crate that re-exports the lodkit crates in one place.
//! Use the individual crates for finer control over dependencies.
//!
//! ## Features
//!
//! - **Core**: meshes, transforms, bounds and the shared error type
//! - **Slicing**: grid slicing on a mesh's bounding box and loose-part separation
//! - **LOD**: decimation levels, the scene model and the LOD generator
//!
//! ## Quick Start
//!
//! ```rust
//! use lodkit::prelude::*;
//!
//! # fn main() -> lodkit::Result<()> {
//! let mesh = TriangleMesh::from_vertices_and_faces(
//!     vec![
//!         Point3f::new(0.0, 0.0, 0.0),
//!         Point3f::new(2.0, 0.0, 0.0),
//!         Point3f::new(2.0, 2.0, 0.0),
//!         Point3f::new(0.0, 2.0, 0.0),
//!     ],
//!     vec![[0, 1, 2], [0, 2, 3]],
//! );
//!
//! let mut scene = Scene::new();
//! let root = scene.root_collection();
//! let plate = scene.add_object("Plate", mesh, root)?;
//!
//! let report = LodGenerator::new().generate(
//!     &mut scene,
//!     &[plate],
//!     &DecimationLevels::with_defaults(),
//!     &SliceConfig::grid(2, 2, 1),
//! )?;
//! assert_eq!(report.sets.len(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables slicing and lod
//! - `slicing`: Bounding boxes, the grid slicer and loose-part separation
//! - `lod`: LOD generation (implies `slicing`)

// Re-export core functionality
pub use lodkit_core::*;

#[cfg(feature = "slicing")]
pub use lodkit_slicing as slicing;

#[cfg(feature = "lod")]
pub use lodkit_lod as lod;

/// Convenient imports for common use cases
pub mod prelude {
    pub use lodkit_core::*;

    #[cfg(feature = "slicing")]
    pub use lodkit_slicing::*;

    #[cfg(feature = "lod")]
    pub use lodkit_lod::*;
}
