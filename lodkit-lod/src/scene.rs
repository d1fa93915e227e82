//! In-memory scene
//!
//! A small model of a modelling host's scene: named objects carrying mesh
//! data, a transform, a material slot and a modifier stack, grouped into
//! collections. [`Scene`] implements [`LodHost`] so generation can run
//! without a real host, and it is what the demo and the tests drive.

use crate::host::{CollectionId, LodHost, MeshReducer, ObjectId};
use lodkit_core::{Error, Result, Transform3D, Transformable, TriangleMesh};
use serde::{Deserialize, Serialize};

/// Name of the collection every scene starts with
pub const ROOT_COLLECTION: &str = "Scene Collection";

/// Non-destructive operation evaluated on top of an object's mesh
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Modifier {
    Decimate { ratio: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub mesh_name: String,
    pub mesh: TriangleMesh,
    pub transform: Transform3D,
    pub material: Option<String>,
    pub modifiers: Vec<Modifier>,
}

impl SceneObject {
    /// Ratio of the last decimation on the stack, if any
    pub fn decimation_ratio(&self) -> Option<f32> {
        self.modifiers.iter().rev().find_map(|m| match m {
            Modifier::Decimate { ratio } => Some(*ratio),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    pub objects: Vec<ObjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    objects: Vec<SceneObject>,
    collections: Vec<Collection>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            collections: vec![Collection {
                name: ROOT_COLLECTION.to_string(),
                objects: Vec::new(),
            }],
        }
    }

    pub fn root_collection(&self) -> CollectionId {
        CollectionId(0)
    }

    pub fn add_collection(&mut self, name: &str) -> CollectionId {
        self.collections.push(Collection {
            name: name.to_string(),
            objects: Vec::new(),
        });
        CollectionId(self.collections.len() - 1)
    }

    /// Add an object with identity transform and link it into `collection`.
    /// The object and its mesh data share the (possibly suffixed) name.
    pub fn add_object(
        &mut self,
        name: &str,
        mesh: TriangleMesh,
        collection: CollectionId,
    ) -> Result<ObjectId> {
        self.collection(collection)?;
        let name = self.unique_object_name(name, None);
        let mesh_name = self.unique_mesh_name(&name, None);
        let id = self.push_object(SceneObject {
            name,
            mesh_name,
            mesh,
            transform: Transform3D::identity(),
            material: None,
            modifiers: Vec::new(),
        });
        self.link(id, collection)?;
        Ok(id)
    }

    pub fn object(&self, id: ObjectId) -> Result<&SceneObject> {
        self.objects
            .get(id.0)
            .ok_or_else(|| Error::host(format!("no object with id {}", id.0)))
    }

    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject> {
        self.objects
            .get_mut(id.0)
            .ok_or_else(|| Error::host(format!("no object with id {}", id.0)))
    }

    pub fn collection(&self, id: CollectionId) -> Result<&Collection> {
        self.collections
            .get(id.0)
            .ok_or_else(|| Error::host(format!("no collection with id {}", id.0)))
    }

    pub fn objects_in(&self, collection: CollectionId) -> Result<&[ObjectId]> {
        Ok(&self.collection(collection)?.objects)
    }

    /// Every collection the object is linked into, in creation order
    pub fn collections_of(&self, id: ObjectId) -> Vec<CollectionId> {
        self.collections
            .iter()
            .enumerate()
            .filter(|(_, c)| c.objects.contains(&id))
            .map(|(i, _)| CollectionId(i))
            .collect()
    }

    pub fn object_ids(&self) -> impl Iterator<Item = ObjectId> {
        (0..self.objects.len()).map(ObjectId)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Remove the object from `collection`. Returns whether it was linked.
    pub fn unlink(&mut self, id: ObjectId, collection: CollectionId) -> Result<bool> {
        self.object(id)?;
        let target = self
            .collections
            .get_mut(collection.0)
            .ok_or_else(|| Error::host(format!("no collection with id {}", collection.0)))?;
        let before = target.objects.len();
        target.objects.retain(|&o| o != id);
        Ok(target.objects.len() != before)
    }

    pub fn set_transform(&mut self, id: ObjectId, transform: Transform3D) -> Result<()> {
        self.object_mut(id)?.transform = transform;
        Ok(())
    }

    pub fn set_material(&mut self, id: ObjectId, material: Option<String>) -> Result<()> {
        self.object_mut(id)?.material = material;
        Ok(())
    }

    /// The object's mesh with its modifier stack applied
    pub fn evaluated_mesh(&self, id: ObjectId, reducer: &dyn MeshReducer) -> Result<TriangleMesh> {
        let object = self.object(id)?;
        let mut mesh = object.mesh.clone();
        if mesh.is_empty() {
            return Ok(mesh);
        }
        for modifier in &object.modifiers {
            match *modifier {
                Modifier::Decimate { ratio } => mesh = reducer.reduce(&mesh, ratio)?,
            }
        }
        Ok(mesh)
    }

    /// The object's mesh moved into world space
    pub fn world_mesh(&self, id: ObjectId) -> Result<TriangleMesh> {
        let object = self.object(id)?;
        let mut mesh = object.mesh.clone();
        mesh.transform(&object.transform);
        Ok(mesh)
    }

    fn push_object(&mut self, object: SceneObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    fn unique_object_name(&self, base: &str, except: Option<ObjectId>) -> String {
        unique_name(base, |candidate| {
            self.objects
                .iter()
                .enumerate()
                .any(|(i, o)| Some(ObjectId(i)) != except && o.name == candidate)
        })
    }

    fn unique_mesh_name(&self, base: &str, except: Option<ObjectId>) -> String {
        unique_name(base, |candidate| {
            self.objects
                .iter()
                .enumerate()
                .any(|(i, o)| Some(ObjectId(i)) != except && o.mesh_name == candidate)
        })
    }
}

/// `base` if free, otherwise `base.001`, `base.002`, ...
fn unique_name(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{}.{:03}", base, n))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

impl LodHost for Scene {
    fn object_name(&self, id: ObjectId) -> Result<String> {
        Ok(self.object(id)?.name.clone())
    }

    fn mesh(&self, id: ObjectId) -> Result<&TriangleMesh> {
        Ok(&self.object(id)?.mesh)
    }

    fn set_mesh(&mut self, id: ObjectId, mesh: TriangleMesh) -> Result<()> {
        self.object_mut(id)?.mesh = mesh;
        Ok(())
    }

    fn spawn_part(&mut self, source: ObjectId, name: &str, mesh: TriangleMesh) -> Result<ObjectId> {
        let collection = self.collection_of(source)?;
        let template = self.object(source)?;
        let (transform, material, modifiers) = (
            template.transform,
            template.material.clone(),
            template.modifiers.clone(),
        );

        let name = self.unique_object_name(name, None);
        let mesh_name = self.unique_mesh_name(&name, None);
        let id = self.push_object(SceneObject {
            name,
            mesh_name,
            mesh,
            transform,
            material,
            modifiers,
        });
        self.link(id, collection)?;
        Ok(id)
    }

    fn duplicate(&mut self, id: ObjectId) -> Result<ObjectId> {
        let mut copy = self.object(id)?.clone();
        copy.name = self.unique_object_name(&copy.name, None);
        copy.mesh_name = self.unique_mesh_name(&copy.mesh_name, None);
        Ok(self.push_object(copy))
    }

    fn collection_of(&self, id: ObjectId) -> Result<CollectionId> {
        let name = &self.object(id)?.name;
        self.collections_of(id)
            .first()
            .copied()
            .ok_or_else(|| Error::host(format!("object '{}' is not linked into any collection", name)))
    }

    fn link(&mut self, id: ObjectId, collection: CollectionId) -> Result<()> {
        self.object(id)?;
        let target = self
            .collections
            .get_mut(collection.0)
            .ok_or_else(|| Error::host(format!("no collection with id {}", collection.0)))?;
        if !target.objects.contains(&id) {
            target.objects.push(id);
        }
        Ok(())
    }

    fn rename(&mut self, id: ObjectId, name: &str) -> Result<String> {
        self.object(id)?;
        let object_name = self.unique_object_name(name, Some(id));
        let mesh_name = self.unique_mesh_name(name, Some(id));
        let object = self.object_mut(id)?;
        object.name = object_name.clone();
        object.mesh_name = mesh_name;
        Ok(object_name)
    }

    fn add_decimation(&mut self, id: ObjectId, ratio: f32) -> Result<()> {
        self.object_mut(id)?
            .modifiers
            .push(Modifier::Decimate { ratio });
        Ok(())
    }
}
