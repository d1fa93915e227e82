//! Host boundary
//!
//! LOD generation never touches scene storage directly. Everything it needs
//! from the modelling environment goes through [`LodHost`], and the actual
//! polygon reduction is left to a [`MeshReducer`].

use lodkit_core::{Error, Result, TriangleMesh};
use lodkit_slicing::extract_faces;
use serde::{Deserialize, Serialize};

/// Handle to an object owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub usize);

/// Handle to a collection owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CollectionId(pub usize);

/// Scene capabilities used by LOD generation and slicing
pub trait LodHost {
    fn object_name(&self, id: ObjectId) -> Result<String>;

    fn mesh(&self, id: ObjectId) -> Result<&TriangleMesh>;

    /// Replace the object's mesh data
    fn set_mesh(&mut self, id: ObjectId, mesh: TriangleMesh) -> Result<()>;

    /// Create a new object from `mesh` that inherits the transform, material
    /// and modifiers of `source` and is linked into the same collection.
    fn spawn_part(&mut self, source: ObjectId, name: &str, mesh: TriangleMesh) -> Result<ObjectId>;

    /// Copy an object together with its mesh data. The copy is not linked
    /// into any collection yet.
    fn duplicate(&mut self, id: ObjectId) -> Result<ObjectId>;

    /// First collection the object is linked into
    fn collection_of(&self, id: ObjectId) -> Result<CollectionId>;

    fn link(&mut self, id: ObjectId, collection: CollectionId) -> Result<()>;

    /// Rename the object and its mesh data. Returns the name actually
    /// assigned, which may carry a suffix if `name` is taken.
    fn rename(&mut self, id: ObjectId, name: &str) -> Result<String>;

    /// Attach a non-destructive decimation pass keeping `ratio` of the faces
    fn add_decimation(&mut self, id: ObjectId, ratio: f32) -> Result<()>;
}

/// Reduce the polygon count of a mesh
pub trait MeshReducer {
    /// Reduce `mesh` so that roughly `ratio` of its faces remain (1.0 = unchanged)
    fn reduce(&self, mesh: &TriangleMesh, ratio: f32) -> Result<TriangleMesh>;
}

/// Keeps evenly spaced faces and drops the rest.
///
/// No error metric, so the result can have holes. Useful for previews and
/// tests where only face counts matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrideReducer;

impl MeshReducer for StrideReducer {
    fn reduce(&self, mesh: &TriangleMesh, ratio: f32) -> Result<TriangleMesh> {
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(Error::invalid(format!(
                "reduction ratio must be in (0, 1], got {}",
                ratio
            )));
        }
        if ratio == 1.0 || mesh.is_empty() {
            return Ok(mesh.clone());
        }

        let total = mesh.face_count();
        let target = ((total as f32 * ratio).round() as usize).clamp(1, total);
        let keep: Vec<usize> = (0..target).map(|i| i * total / target).collect();

        Ok(extract_faces(mesh, &keep))
    }
}
