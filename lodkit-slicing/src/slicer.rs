//! Plane bisection with split cuts
//!
//! [`GridSlicer`] cuts a mesh with the evenly spaced planes of an
//! [`AxisSpec`]. Every plane is applied to the output of the previous one.
//! Along each cut the geometry is split: fragments on opposite sides of a
//! plane never share a vertex lying on that plane, so a later connectivity
//! pass sees them as separate pieces.

use crate::bounds::{AxisSpec, CutPlane};
use itertools::Itertools;
use lodkit_core::{edge_key, Color3, Error, Result, TriangleMesh, Vector3f};
use std::collections::HashMap;
use tracing::{debug, info};

/// Default distance under which a vertex counts as lying on a plane
pub const DEFAULT_PLANE_EPSILON: f32 = 1e-5;

/// Which side of a cut plane a vertex or fragment lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Side {
    Below,
    On,
    Above,
}

/// A polygon corner before it is mapped to an output vertex
#[derive(Debug, Clone, Copy)]
enum Corner {
    Vertex(usize),
    /// Crossing point on the canonical edge `(min, max)`
    Crossing(usize, usize),
}

/// Counters reported by a slicing pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SliceStats {
    pub planes: usize,
    pub faces_cut: usize,
    pub vertices_added: usize,
}

impl std::ops::AddAssign for SliceStats {
    fn add_assign(&mut self, rhs: Self) {
        self.planes += rhs.planes;
        self.faces_cut += rhs.faces_cut;
        self.vertices_added += rhs.vertices_added;
    }
}

/// Cuts meshes along the planes of an [`AxisSpec`]
#[derive(Debug, Clone, Copy)]
pub struct GridSlicer {
    /// Vertices closer than this to a plane are treated as lying on it
    pub epsilon: f32,
}

impl Default for GridSlicer {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_PLANE_EPSILON,
        }
    }
}

impl GridSlicer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_epsilon(epsilon: f32) -> Self {
        Self { epsilon }
    }

    /// Reject axes this slicer cannot cut, without touching any mesh
    pub fn check_axis(&self, axis: &AxisSpec) -> Result<()> {
        axis.validate()?;
        if !axis.is_identity() && axis.length() <= self.epsilon {
            return Err(Error::DegenerateGeometry(format!(
                "cannot cut a zero-length axis into {} segments",
                axis.segments
            )));
        }
        Ok(())
    }

    /// Cut `mesh` in place with every plane of `axis`, in order
    pub fn slice(&self, mesh: &mut TriangleMesh, axis: &AxisSpec) -> Result<SliceStats> {
        self.check_axis(axis)?;
        if axis.is_identity() {
            return Ok(SliceStats::default());
        }

        let mut stats = SliceStats::default();
        for plane in axis.cut_planes() {
            let cut = bisect_and_split(mesh, &plane, self.epsilon);
            debug!(
                "Plane at {:?}: {} faces cut, {} vertices added",
                plane.point, cut.faces_cut, cut.vertices_added
            );
            stats += cut;
        }

        info!(
            "Sliced into {} segments: {} faces cut, {} vertices added, {} faces total",
            axis.segments,
            stats.faces_cut,
            stats.vertices_added,
            mesh.face_count()
        );
        Ok(stats)
    }

    /// Run the x, y and z passes in that order.
    ///
    /// All three axes are checked before the first cut, so an invalid axis
    /// leaves the mesh untouched.
    pub fn slice_grid(&self, mut mesh: TriangleMesh, axes: &[AxisSpec; 3]) -> Result<TriangleMesh> {
        for axis in axes {
            self.check_axis(axis)?;
        }
        for axis in axes {
            self.slice(&mut mesh, axis)?;
        }
        Ok(mesh)
    }
}

/// Bisect the whole mesh with one plane and split the cut
fn bisect_and_split(mesh: &mut TriangleMesh, plane: &CutPlane, epsilon: f32) -> SliceStats {
    let distances: Vec<f32> = mesh
        .vertices
        .iter()
        .map(|v| plane.signed_distance(v))
        .collect();
    let sides: Vec<Side> = distances
        .iter()
        .map(|&d| {
            if d.abs() <= epsilon {
                Side::On
            } else if d > 0.0 {
                Side::Above
            } else {
                Side::Below
            }
        })
        .collect();

    let original_vertices = mesh.vertex_count();
    let faces = std::mem::take(&mut mesh.faces);
    let mut split = PlaneSplit {
        mesh: &mut *mesh,
        distances: &distances,
        sides: &sides,
        crossings: HashMap::new(),
        on_plane_owner: HashMap::new(),
        on_plane_copies: HashMap::new(),
    };

    let mut new_faces = Vec::with_capacity(faces.len());
    let mut faces_cut = 0;
    for face in faces {
        let has_above = face.iter().any(|&v| sides[v] == Side::Above);
        let has_below = face.iter().any(|&v| sides[v] == Side::Below);

        if has_above && has_below {
            faces_cut += 1;
            let (above, below) = clip_triangle(&face, &sides);
            split.emit_fan(&above, Side::Above, &mut new_faces);
            split.emit_fan(&below, Side::Below, &mut new_faces);
        } else {
            // Faces lying entirely on the plane join the lower side
            let side = if has_above { Side::Above } else { Side::Below };
            let corners = face.map(Corner::Vertex);
            split.emit_fan(&corners, side, &mut new_faces);
        }
    }

    mesh.faces = new_faces;
    SliceStats {
        planes: 1,
        faces_cut,
        vertices_added: mesh.vertex_count() - original_vertices,
    }
}

/// Split a triangle straddling the plane into its above and below polygons.
/// Corner order follows the triangle, so both polygons keep its winding.
fn clip_triangle(face: &[usize; 3], sides: &[Side]) -> (Vec<Corner>, Vec<Corner>) {
    let mut above = Vec::with_capacity(4);
    let mut below = Vec::with_capacity(4);

    for (&a, &b) in face.iter().circular_tuple_windows() {
        match sides[a] {
            Side::Above => above.push(Corner::Vertex(a)),
            Side::Below => below.push(Corner::Vertex(a)),
            Side::On => {
                above.push(Corner::Vertex(a));
                below.push(Corner::Vertex(a));
            }
        }

        let crosses = matches!(
            (sides[a], sides[b]),
            (Side::Above, Side::Below) | (Side::Below, Side::Above)
        );
        if crosses {
            let (lo, hi) = edge_key(a, b);
            above.push(Corner::Crossing(lo, hi));
            below.push(Corner::Crossing(lo, hi));
        }
    }

    (above, below)
}

/// Output state for one plane: maps polygon corners to per-side vertices
struct PlaneSplit<'a> {
    mesh: &'a mut TriangleMesh,
    distances: &'a [f32],
    sides: &'a [Side],
    /// `(lo, hi, side)` -> vertex created on the crossing of edge `(lo, hi)`
    crossings: HashMap<(usize, usize, Side), usize>,
    /// Side that kept the original index of an on-plane vertex
    on_plane_owner: HashMap<usize, Side>,
    /// `(vertex, side)` -> copy of an on-plane vertex for the other side
    on_plane_copies: HashMap<(usize, Side), usize>,
}

impl PlaneSplit<'_> {
    /// Fan-triangulate a convex polygon on `side` and append its faces
    fn emit_fan(&mut self, polygon: &[Corner], side: Side, out: &mut Vec<[usize; 3]>) {
        if polygon.len() < 3 {
            return;
        }
        let indices: Vec<usize> = polygon.iter().map(|&c| self.resolve(c, side)).collect();
        for i in 1..indices.len() - 1 {
            out.push([indices[0], indices[i], indices[i + 1]]);
        }
    }

    fn resolve(&mut self, corner: Corner, side: Side) -> usize {
        match corner {
            Corner::Vertex(v) if self.sides[v] != Side::On => v,
            Corner::Vertex(v) => {
                let owner = *self.on_plane_owner.entry(v).or_insert(side);
                if owner == side {
                    return v;
                }
                if let Some(&copy) = self.on_plane_copies.get(&(v, side)) {
                    return copy;
                }
                let copy = self.push_vertex(v, v, 0.0);
                self.on_plane_copies.insert((v, side), copy);
                copy
            }
            Corner::Crossing(lo, hi) => {
                if let Some(&existing) = self.crossings.get(&(lo, hi, side)) {
                    return existing;
                }
                let (d_lo, d_hi) = (self.distances[lo], self.distances[hi]);
                let t = d_lo / (d_lo - d_hi);
                let vertex = self.push_vertex(lo, hi, t);
                self.crossings.insert((lo, hi, side), vertex);
                vertex
            }
        }
    }

    /// Append a vertex interpolated between `a` and `b` at `t`, with attributes
    fn push_vertex(&mut self, a: usize, b: usize, t: f32) -> usize {
        let pa = self.mesh.vertices[a];
        let pb = self.mesh.vertices[b];
        let index = self.mesh.add_vertex(pa + (pb - pa) * t);

        if let Some(normals) = &mut self.mesh.normals {
            let n = lerp_normal(&normals[a], &normals[b], t);
            normals.push(n);
        }
        if let Some(colors) = &mut self.mesh.colors {
            let c = lerp_color(colors[a], colors[b], t);
            colors.push(c);
        }
        index
    }
}

fn lerp_normal(a: &Vector3f, b: &Vector3f, t: f32) -> Vector3f {
    let n = a.lerp(b, t);
    let len = n.norm();
    if len > f32::EPSILON && len.is_finite() {
        n / len
    } else {
        *a
    }
}

fn lerp_color(a: Color3, b: Color3, t: f32) -> Color3 {
    let mut out = [0u8; 3];
    for i in 0..3 {
        let v = a[i] as f32 + (b[i] as f32 - a[i] as f32) * t;
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}
