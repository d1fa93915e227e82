//! Editing session state
//!
//! Holds what the LOD panel shows between operations: the level list, the
//! ratio typed into the entry field, the selected row and the slicing
//! options. The level list is seeded once, on first activation.

use crate::levels::{DecimationLevel, DecimationLevels, DEFAULT_DECIMATIONS};
use crate::settings::LodSettings;
use lodkit_core::{Error, Result};
use lodkit_slicing::SliceConfig;
use tracing::debug;

/// Ratio shown in the entry field of a fresh session
pub const DEFAULT_PENDING_RATIO: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct LodSession {
    levels: DecimationLevels,
    initialized: bool,
    pending_ratio: f32,
    active_index: usize,
    seed_ratios: Vec<f32>,
    pub slice: SliceConfig,
}

impl Default for LodSession {
    fn default() -> Self {
        Self {
            levels: DecimationLevels::new(),
            initialized: false,
            pending_ratio: DEFAULT_PENDING_RATIO,
            active_index: 0,
            seed_ratios: DEFAULT_DECIMATIONS.to_vec(),
            slice: SliceConfig::default(),
        }
    }
}

impl LodSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session configured from loaded settings. Nothing is seeded until
    /// [`activate`](Self::activate).
    pub fn with_settings(settings: &LodSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            pending_ratio: settings.pending_ratio,
            seed_ratios: settings.seed_ratios.clone(),
            slice: settings.slice,
            ..Self::default()
        })
    }

    /// Seed the level list on first activation. Later calls do nothing,
    /// even if the list has been emptied since.
    pub fn activate(&mut self) -> Result<()> {
        if self.initialized {
            return Ok(());
        }
        if self.levels.is_empty() {
            self.levels = DecimationLevels::from_ratios(self.seed_ratios.iter().copied())?;
            debug!("Seeded {} decimation levels", self.levels.len());
        }
        self.initialized = true;
        Ok(())
    }

    /// Drop all session state; the next activation seeds again
    pub fn deactivate(&mut self) {
        self.levels.clear();
        self.initialized = false;
        self.active_index = 0;
        self.pending_ratio = DEFAULT_PENDING_RATIO;
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn levels(&self) -> &DecimationLevels {
        &self.levels
    }

    /// Direct access for in-place edits; call `reorder` on the levels
    /// afterwards to restore sorting.
    pub fn levels_mut(&mut self) -> &mut DecimationLevels {
        &mut self.levels
    }

    pub fn pending_ratio(&self) -> f32 {
        self.pending_ratio
    }

    pub fn set_pending_ratio(&mut self, ratio: f32) -> Result<()> {
        DecimationLevel::new(ratio)?;
        self.pending_ratio = ratio;
        Ok(())
    }

    /// Add the entry field's ratio to the list
    pub fn add_pending(&mut self) -> Result<()> {
        self.levels.add(self.pending_ratio)
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn select(&mut self, index: usize) -> Result<()> {
        if index >= self.levels.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.levels.len(),
            });
        }
        self.active_index = index;
        Ok(())
    }

    /// Remove the selected level and keep the selection inside the list
    pub fn remove_active(&mut self) -> Result<DecimationLevel> {
        let removed = self.levels.remove(self.active_index)?;
        self.active_index = self.active_index.min(self.levels.len().saturating_sub(1));
        Ok(removed)
    }

    pub fn set_slice_enabled(&mut self, enabled: bool) {
        self.slice.enabled = enabled;
    }

    pub fn set_segments(&mut self, segments: [u32; 3]) -> Result<()> {
        let candidate = SliceConfig {
            segments,
            ..self.slice
        };
        candidate.validate()?;
        self.slice = candidate;
        Ok(())
    }

    /// Current state as settings that can be saved
    pub fn to_settings(&self) -> LodSettings {
        LodSettings {
            seed_ratios: if self.levels.is_empty() {
                self.seed_ratios.clone()
            } else {
                self.levels.ratios()
            },
            pending_ratio: self.pending_ratio,
            slice: self.slice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_activation_seeds_defaults() {
        let mut session = LodSession::new();
        assert!(session.levels().is_empty());
        session.activate().unwrap();
        assert!(session.is_initialized());
        assert_eq!(session.levels().ratios(), vec![1.0, 0.5, 0.2, 0.1]);
    }

    #[test]
    fn test_reactivation_never_reseeds() {
        let mut session = LodSession::new();
        session.activate().unwrap();
        while !session.levels().is_empty() {
            session.remove_active().unwrap();
        }
        session.activate().unwrap();
        assert!(session.levels().is_empty());
    }

    #[test]
    fn test_deactivate_resets() {
        let mut session = LodSession::new();
        session.activate().unwrap();
        session.set_pending_ratio(0.3).unwrap();
        session.select(2).unwrap();
        session.deactivate();

        assert!(!session.is_initialized());
        assert!(session.levels().is_empty());
        assert_eq!(session.active_index(), 0);
        assert_eq!(session.pending_ratio(), DEFAULT_PENDING_RATIO);

        session.activate().unwrap();
        assert_eq!(session.levels().len(), 4);
    }

    #[test]
    fn test_add_pending() {
        let mut session = LodSession::new();
        session.activate().unwrap();
        session.set_pending_ratio(0.3).unwrap();
        session.add_pending().unwrap();
        assert_eq!(session.levels().ratios(), vec![1.0, 0.5, 0.3, 0.2, 0.1]);
    }

    #[test]
    fn test_pending_ratio_validated() {
        let mut session = LodSession::new();
        assert!(session.set_pending_ratio(0.0).is_err());
        assert!(session.set_pending_ratio(1.01).is_err());
        assert_eq!(session.pending_ratio(), DEFAULT_PENDING_RATIO);
    }

    #[test]
    fn test_remove_last_clamps_selection() {
        let mut session = LodSession::new();
        session.activate().unwrap();
        session.select(3).unwrap();
        let removed = session.remove_active().unwrap();
        assert_eq!(removed.ratio(), 0.1);
        assert_eq!(session.active_index(), 2);
        assert_eq!(session.levels().ratios(), vec![1.0, 0.5, 0.2]);
    }

    #[test]
    fn test_remove_from_empty_list() {
        let mut session = LodSession::new();
        assert!(matches!(
            session.remove_active(),
            Err(Error::IndexOutOfRange { index: 0, len: 0 })
        ));
    }

    #[test]
    fn test_select_out_of_range() {
        let mut session = LodSession::new();
        session.activate().unwrap();
        assert!(session.select(4).is_err());
        assert_eq!(session.active_index(), 0);
    }

    #[test]
    fn test_segments_validated() {
        let mut session = LodSession::new();
        session.set_segments([3, 1, 2]).unwrap();
        assert_eq!(session.slice.segments, [3, 1, 2]);
        assert!(session.set_segments([0, 1, 1]).is_err());
        assert_eq!(session.slice.segments, [3, 1, 2]);

        session.set_slice_enabled(true);
        assert!(session.slice.enabled);
    }

    #[test]
    fn test_with_settings_uses_seed() {
        let settings = LodSettings {
            seed_ratios: vec![0.25, 1.0],
            pending_ratio: 0.75,
            slice: SliceConfig::grid(2, 2, 2),
        };
        let mut session = LodSession::with_settings(&settings).unwrap();
        assert!(session.levels().is_empty());
        session.activate().unwrap();
        assert_eq!(session.levels().ratios(), vec![1.0, 0.25]);
        assert_eq!(session.pending_ratio(), 0.75);
        assert!(session.slice.enabled);

        let saved = session.to_settings();
        assert_eq!(saved.seed_ratios, vec![1.0, 0.25]);
    }
}
