//! Slicing configuration

use crate::slicer::DEFAULT_PLANE_EPSILON;
use lodkit_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Pre-slice settings applied before LOD generation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliceConfig {
    /// Slice selected objects before duplicating them
    pub enabled: bool,
    /// Segment counts along x, y and z; 1 means no cut on that axis
    pub segments: [u32; 3],
    /// Plane tolerance used by the slicer
    pub epsilon: f32,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            segments: [2, 2, 1],
            epsilon: DEFAULT_PLANE_EPSILON,
        }
    }
}

impl SliceConfig {
    /// Enabled config with the given segment counts
    pub fn grid(x: u32, y: u32, z: u32) -> Self {
        Self {
            enabled: true,
            segments: [x, y, z],
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(axis) = self.segments.iter().position(|&s| s == 0) {
            return Err(Error::invalid(format!(
                "segment count for axis {} must be at least 1",
                ["x", "y", "z"][axis]
            )));
        }
        if !(self.epsilon.is_finite() && self.epsilon >= 0.0) {
            return Err(Error::invalid("plane tolerance must be a non-negative number"));
        }
        Ok(())
    }

    /// Number of grid cells the slicing can produce at most
    pub fn cell_count(&self) -> u64 {
        self.segments.iter().map(|&s| s as u64).product()
    }
}
