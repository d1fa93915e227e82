//! Loose-part separation
//!
//! Faces are adjacent when they share an edge. After a split cut no edge
//! spans the cut, so each side ends up in its own component.

use lodkit_core::{edge_key, TriangleMesh};
use std::collections::{HashMap, VecDeque};
use tracing::debug;

/// Face index sets of the face-adjacency graph.
///
/// Components are ordered by their lowest face index and list their faces in
/// ascending order.
pub fn connected_components(mesh: &TriangleMesh) -> Vec<Vec<usize>> {
    let mut edge_to_faces: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    for (fi, &[a, b, c]) in mesh.faces.iter().enumerate() {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            edge_to_faces.entry(edge_key(u, v)).or_default().push(fi);
        }
    }

    let mut component_of = vec![usize::MAX; mesh.faces.len()];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for seed in 0..mesh.faces.len() {
        if component_of[seed] != usize::MAX {
            continue;
        }
        let id = components.len();
        let mut faces = Vec::new();
        component_of[seed] = id;
        queue.push_back(seed);

        while let Some(fi) = queue.pop_front() {
            faces.push(fi);
            let [a, b, c] = mesh.faces[fi];
            for (u, v) in [(a, b), (b, c), (c, a)] {
                for &neighbor in &edge_to_faces[&edge_key(u, v)] {
                    if component_of[neighbor] == usize::MAX {
                        component_of[neighbor] = id;
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        faces.sort_unstable();
        components.push(faces);
    }

    components
}

/// Build one independent mesh per connected component.
///
/// Positions, normals, colors and face winding are kept; vertices are
/// renumbered in order of first use. A mesh without faces yields no parts.
pub fn separate_loose_parts(mesh: &TriangleMesh) -> Vec<TriangleMesh> {
    let components = connected_components(mesh);
    debug!("Found {} loose parts in {} faces", components.len(), mesh.face_count());

    components
        .iter()
        .map(|faces| extract_faces(mesh, faces))
        .collect()
}

/// Copy the given faces and the vertices they use into a new mesh
pub fn extract_faces(mesh: &TriangleMesh, faces: &[usize]) -> TriangleMesh {
    let mut remap: HashMap<usize, usize> = HashMap::new();
    let mut part = TriangleMesh::new();
    let mut normals = mesh.normals.as_ref().map(|_| Vec::new());
    let mut colors = mesh.colors.as_ref().map(|_| Vec::new());

    for &fi in faces {
        let face = mesh.faces[fi].map(|v| {
            *remap.entry(v).or_insert_with(|| {
                if let (Some(out), Some(src)) = (normals.as_mut(), mesh.normals.as_ref()) {
                    out.push(src[v]);
                }
                if let (Some(out), Some(src)) = (colors.as_mut(), mesh.colors.as_ref()) {
                    out.push(src[v]);
                }
                part.add_vertex(mesh.vertices[v])
            })
        });
        part.add_face(face);
    }

    part.normals = normals;
    part.colors = colors;
    part
}
