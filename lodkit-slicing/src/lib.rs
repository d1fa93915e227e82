//! Grid slicing for triangle meshes
//!
//! This crate cuts a mesh along evenly spaced planes on up to three
//! perpendicular axes and separates the result into disconnected pieces:
//! - Bounding boxes and slicing axes
//! - Plane bisection with split cuts
//! - Loose-part separation

pub mod bounds;
pub mod config;
pub mod separate;
pub mod slicer;

pub use bounds::*;
pub use config::*;
pub use separate::*;
pub use slicer::*;

use lodkit_core::{Result, TriangleMesh};
use tracing::{debug, info};

/// Slice `mesh` on its own bounding box grid and split it into loose parts.
///
/// `segments` gives the number of slabs along x, y and z.
pub fn slice_into_parts(
    mesh: TriangleMesh,
    segments: [u32; 3],
    slicer: &GridSlicer,
) -> Result<Vec<TriangleMesh>> {
    let bounds = BoundingBox::from_mesh(&mesh);
    if bounds.is_degenerate(slicer.epsilon) {
        debug!("Mesh is flat on at least one axis, extent {:?}", bounds.extent());
    }
    let axes = bounds.axis_specs(segments)?;
    let sliced = slicer.slice_grid(mesh, &axes)?;
    let parts = separate_loose_parts(&sliced);
    info!(
        "Split mesh on a {}x{}x{} grid into {} parts",
        segments[0],
        segments[1],
        segments[2],
        parts.len()
    );
    Ok(parts)
}
