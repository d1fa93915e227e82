//! Bounding boxes and slicing axes
//!
//! A [`BoundingBox`] stores its eight corners in a fixed order so that the
//! three box edges leaving the origin corner can be picked by index:
//!
//! | index | corner          |
//! |-------|-----------------|
//! | 0     | (min, min, min) |
//! | 1     | (min, min, max) |
//! | 2     | (min, max, max) |
//! | 3     | (min, max, min) |
//! | 4     | (max, min, min) |
//! | 5     | (max, min, max) |
//! | 6     | (max, max, max) |
//! | 7     | (max, max, min) |

use lodkit_core::{Bounded, Error, Point3f, Result, TriangleMesh, Vector3f};
use serde::{Deserialize, Serialize};

/// Corner indices of the origin, x, y and z endpoints
const AXIS_CORNERS: [usize; 4] = [0, 4, 3, 1];

/// Axis-aligned bounding box in mesh space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    corners: [Point3f; 8],
}

/// The origin corner and the far end of each box edge leaving it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisEndpoints {
    pub origin: Point3f,
    pub x: Point3f,
    pub y: Point3f,
    pub z: Point3f,
}

impl BoundingBox {
    /// Build the box spanned by `min` and `max`
    pub fn from_min_max(min: Point3f, max: Point3f) -> Self {
        let (a, b) = (min, max);
        Self {
            corners: [
                Point3f::new(a.x, a.y, a.z),
                Point3f::new(a.x, a.y, b.z),
                Point3f::new(a.x, b.y, b.z),
                Point3f::new(a.x, b.y, a.z),
                Point3f::new(b.x, a.y, a.z),
                Point3f::new(b.x, a.y, b.z),
                Point3f::new(b.x, b.y, b.z),
                Point3f::new(b.x, b.y, a.z),
            ],
        }
    }

    /// Compute the box of a mesh. An empty mesh yields a zero box at the origin.
    pub fn from_mesh(mesh: &TriangleMesh) -> Self {
        let (min, max) = mesh.bounding_box();
        Self::from_min_max(min, max)
    }

    pub fn corners(&self) -> &[Point3f; 8] {
        &self.corners
    }

    pub fn min(&self) -> Point3f {
        self.corners[0]
    }

    pub fn max(&self) -> Point3f {
        self.corners[6]
    }

    pub fn extent(&self) -> Vector3f {
        self.max() - self.min()
    }

    pub fn volume(&self) -> f32 {
        let e = self.extent();
        e.x * e.y * e.z
    }

    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min(), &self.max())
    }

    /// True if any side is not longer than `epsilon`
    pub fn is_degenerate(&self, epsilon: f32) -> bool {
        self.extent().iter().any(|&side| side <= epsilon)
    }

    /// Select the origin corner and the x, y and z endpoints
    pub fn axis_endpoints(&self) -> AxisEndpoints {
        let [o, x, y, z] = AXIS_CORNERS.map(|i| self.corners[i]);
        AxisEndpoints { origin: o, x, y, z }
    }

    /// Derive the x, y and z slicing axes with the given segment counts
    pub fn axis_specs(&self, segments: [u32; 3]) -> Result<[AxisSpec; 3]> {
        let ends = self.axis_endpoints();
        Ok([
            AxisSpec::new(ends.origin, ends.x, segments[0])?,
            AxisSpec::new(ends.origin, ends.y, segments[1])?,
            AxisSpec::new(ends.origin, ends.z, segments[2])?,
        ])
    }
}

/// One slicing direction: `segments` equal slabs between `origin` and `endpoint`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSpec {
    pub origin: Point3f,
    pub endpoint: Point3f,
    pub segments: u32,
}

impl AxisSpec {
    /// Create an axis. Zero segments is rejected.
    pub fn new(origin: Point3f, endpoint: Point3f, segments: u32) -> Result<Self> {
        let axis = Self {
            origin,
            endpoint,
            segments,
        };
        axis.validate()?;
        Ok(axis)
    }

    pub fn validate(&self) -> Result<()> {
        if self.segments == 0 {
            return Err(Error::invalid("segment count must be at least 1"));
        }
        Ok(())
    }

    pub fn length(&self) -> f32 {
        (self.endpoint - self.origin).norm()
    }

    /// True when this axis produces no cut
    pub fn is_identity(&self) -> bool {
        self.segments == 1
    }

    /// Unit direction from origin to endpoint
    pub fn direction(&self) -> Vector3f {
        (self.endpoint - self.origin).normalize()
    }

    /// The `segments - 1` cut planes in increasing order along the axis
    pub fn cut_planes(&self) -> Vec<CutPlane> {
        if self.segments <= 1 {
            return Vec::new();
        }
        let normal = self.direction();
        (1..self.segments)
            .map(|k| CutPlane {
                point: self
                    .origin
                    .lerp(&self.endpoint, k as f32 / self.segments as f32),
                normal,
            })
            .collect()
    }
}

/// A cutting plane through `point` with unit `normal`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutPlane {
    pub point: Point3f,
    pub normal: Vector3f,
}

impl CutPlane {
    /// Signed distance of `p`, positive on the side the normal points to
    #[inline]
    pub fn signed_distance(&self, p: &Point3f) -> f32 {
        (p - self.point).dot(&self.normal)
    }
}
