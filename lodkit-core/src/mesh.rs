//! Mesh data structures and functionality

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A triangle mesh with vertices and faces
///
/// Edges are implicit: every unordered vertex pair used by a face. Optional
/// normals and colors are stored per vertex and, when present, always have
/// one entry per vertex.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriangleMesh {
    pub vertices: Vec<Point3f>,
    pub faces: Vec<[usize; 3]>,
    pub normals: Option<Vec<Vector3f>>,
    pub colors: Option<Vec<Color3>>,
}

impl TriangleMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: None,
            colors: None,
        }
    }

    /// Create a mesh from vertices and faces
    pub fn from_vertices_and_faces(vertices: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        Self {
            vertices,
            faces,
            normals: None,
            colors: None,
        }
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Get the number of distinct edges
    pub fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Distinct edges as `(min, max)` vertex pairs, sorted
    pub fn edges(&self) -> Vec<(usize, usize)> {
        let mut edges = BTreeSet::new();
        for &[a, b, c] in &self.faces {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                edges.insert(edge_key(u, v));
            }
        }
        edges.into_iter().collect()
    }

    /// Check if the mesh is empty
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Add a vertex to the mesh
    pub fn add_vertex(&mut self, vertex: Point3f) -> usize {
        let index = self.vertices.len();
        self.vertices.push(vertex);
        index
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// Calculate face normals
    pub fn calculate_face_normals(&self) -> Vec<Vector3f> {
        self.faces
            .iter()
            .map(|face| {
                let v0 = self.vertices[face[0]];
                let v1 = self.vertices[face[1]];
                let v2 = self.vertices[face[2]];

                let edge1 = v1 - v0;
                let edge2 = v2 - v0;

                edge1.cross(&edge2).normalize()
            })
            .collect()
    }

    /// Area of a single face
    pub fn face_area(&self, face: usize) -> f32 {
        let [a, b, c] = self.faces[face];
        let e1 = self.vertices[b] - self.vertices[a];
        let e2 = self.vertices[c] - self.vertices[a];
        e1.cross(&e2).norm() * 0.5
    }

    /// Total area of all faces
    pub fn surface_area(&self) -> f32 {
        (0..self.faces.len()).map(|f| self.face_area(f)).sum()
    }

    /// Set vertex normals
    pub fn set_normals(&mut self, normals: Vec<Vector3f>) {
        if normals.len() == self.vertices.len() {
            self.normals = Some(normals);
        }
    }

    /// Set vertex colors
    pub fn set_colors(&mut self, colors: Vec<Color3>) {
        if colors.len() == self.vertices.len() {
            self.colors = Some(colors);
        }
    }

    /// Check face indices and attribute lengths
    pub fn validate(&self) -> Result<()> {
        let n = self.vertices.len();
        if let Some((fi, face)) = self
            .faces
            .iter()
            .enumerate()
            .find(|(_, face)| face.iter().any(|&v| v >= n))
        {
            return Err(Error::invalid(format!(
                "face {} references vertex {:?} but mesh has {} vertices",
                fi, face, n
            )));
        }
        if self.normals.as_ref().is_some_and(|normals| normals.len() != n) {
            return Err(Error::invalid("normal count does not match vertex count"));
        }
        if self.colors.as_ref().is_some_and(|colors| colors.len() != n) {
            return Err(Error::invalid("color count does not match vertex count"));
        }
        Ok(())
    }

    /// Clear the mesh
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.normals = None;
        self.colors = None;
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical `(min, max)` key for an undirected edge
#[inline]
pub fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
