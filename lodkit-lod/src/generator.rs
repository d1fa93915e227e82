//! LOD set generation
//!
//! For every selected object the generator optionally slices the mesh into
//! grid parts, then builds one LOD set per resulting object: the object
//! itself becomes tier 0 and a decimated duplicate is added for every
//! further level.

use crate::host::{LodHost, ObjectId};
use crate::levels::DecimationLevels;
use lodkit_core::{Error, Result};
use lodkit_slicing::{slice_into_parts, GridSlicer, SliceConfig};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Suffix placed between an object's name and its tier number
pub const DEFAULT_TIER_SUFFIX: &str = "_LOD";

/// One object of a LOD set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LodTier {
    pub object: ObjectId,
    pub tier: usize,
    /// Fraction of faces kept; tier 0 is always full detail
    pub ratio: f32,
    pub name: String,
}

/// All tiers built from one source object
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LodSet {
    pub source_name: String,
    pub tiers: Vec<LodTier>,
}

impl LodSet {
    pub fn base(&self) -> Option<&LodTier> {
        self.tiers.first()
    }
}

/// Object that stopped a generation run
#[derive(Debug)]
pub struct GenerationFailure {
    pub object: ObjectId,
    pub error: Error,
}

/// Result of a generation run.
///
/// Sets completed before a failure are kept; the host is not rolled back.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub sets: Vec<LodSet>,
    pub failure: Option<GenerationFailure>,
}

impl GenerationReport {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Number of objects across all sets, originals included
    pub fn object_count(&self) -> usize {
        self.sets.iter().map(|s| s.tiers.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct LodGenerator {
    pub tier_suffix: String,
}

impl Default for LodGenerator {
    fn default() -> Self {
        Self {
            tier_suffix: DEFAULT_TIER_SUFFIX.to_string(),
        }
    }
}

impl LodGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier_suffix(suffix: impl Into<String>) -> Self {
        Self {
            tier_suffix: suffix.into(),
        }
    }

    /// Build LOD sets for every object in `selection`.
    ///
    /// Arguments are checked before any object is touched. A failure while
    /// processing an object halts the run and is returned in the report
    /// instead of as an `Err`. Levels are applied highest ratio first even
    /// when the list was edited out of order.
    pub fn generate<H: LodHost + ?Sized>(
        &self,
        host: &mut H,
        selection: &[ObjectId],
        levels: &DecimationLevels,
        slice: &SliceConfig,
    ) -> Result<GenerationReport> {
        if levels.is_empty() {
            return Err(Error::invalid("at least one decimation level is required"));
        }
        if slice.enabled {
            slice.validate()?;
        }
        let mut sorted;
        let levels = if levels.is_sorted() {
            levels
        } else {
            debug!("Decimation levels out of order, sorting {:?}", levels.ratios());
            sorted = levels.clone();
            sorted.reorder();
            &sorted
        };

        let mut report = GenerationReport::default();
        for &object in selection {
            if let Err(error) = self.process_object(host, object, levels, slice, &mut report.sets) {
                warn!("LOD generation halted at object {}: {}", object.0, error);
                report.failure = Some(GenerationFailure { object, error });
                break;
            }
        }

        info!(
            "Generated {} LOD sets ({} objects) from {} selected objects",
            report.sets.len(),
            report.object_count(),
            selection.len()
        );
        Ok(report)
    }

    /// Slice one object on its bounding box grid.
    ///
    /// The first loose part replaces the object's mesh and every other part
    /// becomes a new object named `<name>.001`, `<name>.002`, ... Returns
    /// the ids of all resulting objects, the original first. A mesh without
    /// faces is left as is.
    pub fn slice_object<H: LodHost + ?Sized>(
        &self,
        host: &mut H,
        object: ObjectId,
        config: &SliceConfig,
    ) -> Result<Vec<ObjectId>> {
        config.validate()?;
        let name = host.object_name(object)?;
        let mesh = host.mesh(object)?;
        if mesh.faces.is_empty() {
            debug!("Object '{}' has no faces, skipping slice", name);
            return Ok(vec![object]);
        }

        debug!("Slicing '{}' into at most {} grid cells", name, config.cell_count());
        let slicer = GridSlicer::with_epsilon(config.epsilon);
        let mut parts = slice_into_parts(mesh.clone(), config.segments, &slicer)?.into_iter();

        let mut ids = vec![object];
        if let Some(first) = parts.next() {
            host.set_mesh(object, first)?;
        }
        for (k, part) in parts.enumerate() {
            let part_name = format!("{}.{:03}", name, k + 1);
            ids.push(host.spawn_part(object, &part_name, part)?);
        }

        info!("Sliced '{}' into {} objects", name, ids.len());
        Ok(ids)
    }

    fn process_object<H: LodHost + ?Sized>(
        &self,
        host: &mut H,
        object: ObjectId,
        levels: &DecimationLevels,
        slice: &SliceConfig,
        sets: &mut Vec<LodSet>,
    ) -> Result<()> {
        let targets = if slice.enabled {
            self.slice_object(host, object, slice)?
        } else {
            vec![object]
        };
        for target in targets {
            sets.push(self.build_set(host, target, levels)?);
        }
        Ok(())
    }

    fn build_set<H: LodHost + ?Sized>(
        &self,
        host: &mut H,
        target: ObjectId,
        levels: &DecimationLevels,
    ) -> Result<LodSet> {
        let source_name = host.object_name(target)?;
        let collection = host.collection_of(target)?;
        let mut tiers = Vec::with_capacity(levels.len());

        for (tier, level) in levels.iter().enumerate().skip(1) {
            let copy = host.duplicate(target)?;
            host.link(copy, collection)?;
            host.add_decimation(copy, level.ratio())?;
            let name = host.rename(copy, &self.tier_name(&source_name, tier))?;
            debug!("Built '{}' at ratio {}", name, level.ratio());
            tiers.push(LodTier {
                object: copy,
                tier,
                ratio: level.ratio(),
                name,
            });
        }

        let name = host.rename(target, &self.tier_name(&source_name, 0))?;
        tiers.insert(
            0,
            LodTier {
                object: target,
                tier: 0,
                ratio: 1.0,
                name,
            },
        );

        Ok(LodSet { source_name, tiers })
    }

    fn tier_name(&self, base: &str, tier: usize) -> String {
        format!("{}{}{}", base, self.tier_suffix, tier)
    }
}
