//! Ordered decimation ratios
//!
//! [`DecimationLevels`] holds the LOD tiers as ratios in (0, 1], sorted from
//! the least reduced to the most reduced. Tier 0 is full detail.

use lodkit_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Ratios seeded into a fresh session
pub const DEFAULT_DECIMATIONS: [f32; 4] = [1.0, 0.5, 0.2, 0.1];

/// A single decimation ratio in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct DecimationLevel {
    ratio: f32,
}

impl DecimationLevel {
    pub fn new(ratio: f32) -> Result<Self> {
        check_ratio(ratio)?;
        Ok(Self { ratio })
    }

    /// Fraction of faces kept at this tier
    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn is_full_detail(&self) -> bool {
        self.ratio == 1.0
    }

    /// List label for this level shown at `index`
    pub fn label(&self, index: usize) -> String {
        if self.is_full_detail() {
            "LOD_0 Full Detail".to_string()
        } else {
            format!("LOD_{} ({:.2}%)", index, self.ratio * 100.0)
        }
    }
}

impl TryFrom<f32> for DecimationLevel {
    type Error = Error;

    fn try_from(ratio: f32) -> Result<Self> {
        Self::new(ratio)
    }
}

impl From<DecimationLevel> for f32 {
    fn from(level: DecimationLevel) -> f32 {
        level.ratio
    }
}

fn check_ratio(ratio: f32) -> Result<()> {
    if ratio > 0.0 && ratio <= 1.0 {
        Ok(())
    } else {
        Err(Error::invalid(format!(
            "decimation ratio must be in (0, 1], got {}",
            ratio
        )))
    }
}

/// Decimation ratios kept in descending order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f32>", into = "Vec<f32>")]
pub struct DecimationLevels {
    levels: Vec<DecimationLevel>,
}

impl TryFrom<Vec<f32>> for DecimationLevels {
    type Error = Error;

    fn try_from(ratios: Vec<f32>) -> Result<Self> {
        Self::from_ratios(ratios)
    }
}

impl From<DecimationLevels> for Vec<f32> {
    fn from(levels: DecimationLevels) -> Vec<f32> {
        levels.ratios()
    }
}

impl DecimationLevels {
    pub fn new() -> Self {
        Self::default()
    }

    /// The default tiers `[1.0, 0.5, 0.2, 0.1]`
    pub fn with_defaults() -> Self {
        let mut levels = Self::new();
        levels.seed_defaults();
        levels
    }

    /// Build from arbitrary ratios; the result is sorted
    pub fn from_ratios(ratios: impl IntoIterator<Item = f32>) -> Result<Self> {
        let levels = ratios
            .into_iter()
            .map(DecimationLevel::new)
            .collect::<Result<Vec<_>>>()?;
        let mut levels = Self { levels };
        levels.reorder();
        Ok(levels)
    }

    /// Insert a ratio and re-sort.
    ///
    /// Equal ratios keep insertion order, so the new level lands after any
    /// existing level with the same value.
    pub fn add(&mut self, ratio: f32) -> Result<()> {
        let level = DecimationLevel::new(ratio)?;
        self.levels.push(level);
        self.reorder();
        Ok(())
    }

    /// Remove the level at `index`. Remaining levels keep their order.
    pub fn remove(&mut self, index: usize) -> Result<DecimationLevel> {
        self.check_index(index)?;
        Ok(self.levels.remove(index))
    }

    /// Overwrite the ratio at `index` without re-sorting
    pub fn set_ratio(&mut self, index: usize, ratio: f32) -> Result<()> {
        self.check_index(index)?;
        self.levels[index] = DecimationLevel::new(ratio)?;
        Ok(())
    }

    /// Restore descending order after in-place edits
    pub fn reorder(&mut self) {
        self.levels.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    }

    /// Fill the default tiers if there are no levels yet.
    /// Returns whether anything was added.
    pub fn seed_defaults(&mut self) -> bool {
        if !self.levels.is_empty() {
            return false;
        }
        self.levels = DEFAULT_DECIMATIONS
            .iter()
            .map(|&ratio| DecimationLevel { ratio })
            .collect();
        true
    }

    pub fn get(&self, index: usize) -> Option<&DecimationLevel> {
        self.levels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DecimationLevel> {
        self.levels.iter()
    }

    pub fn ratios(&self) -> Vec<f32> {
        self.levels.iter().map(|l| l.ratio).collect()
    }

    pub fn labels(&self) -> Vec<String> {
        self.levels
            .iter()
            .enumerate()
            .map(|(i, l)| l.label(i))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.levels.windows(2).all(|w| w[0].ratio >= w[1].ratio)
    }

    pub fn clear(&mut self) {
        self.levels.clear();
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.levels.len() {
            return Err(Error::IndexOutOfRange {
                index,
                len: self.levels.len(),
            });
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DecimationLevels {
    type Item = &'a DecimationLevel;
    type IntoIter = std::slice::Iter<'a, DecimationLevel>;

    fn into_iter(self) -> Self::IntoIter {
        self.levels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_defaults() {
        let levels = DecimationLevels::with_defaults();
        assert_eq!(levels.ratios(), vec![1.0, 0.5, 0.2, 0.1]);
        assert!(levels.is_sorted());
    }

    #[test]
    fn test_seed_only_when_empty() {
        let mut levels = DecimationLevels::from_ratios([0.7]).unwrap();
        assert!(!levels.seed_defaults());
        assert_eq!(levels.ratios(), vec![0.7]);
    }

    #[test]
    fn test_add_keeps_descending_order() {
        let mut levels = DecimationLevels::with_defaults();
        levels.add(0.3).unwrap();
        assert_eq!(levels.ratios(), vec![1.0, 0.5, 0.3, 0.2, 0.1]);
        levels.add(0.05).unwrap();
        assert_eq!(levels.ratios().last(), Some(&0.05));
    }

    #[test]
    fn test_random_adds_stay_sorted() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut levels = DecimationLevels::new();
        for _ in 0..200 {
            let ratio: f32 = rng.gen_range(0.001..=1.0);
            levels.add(ratio).unwrap();
            assert!(levels.is_sorted());
        }
        assert_eq!(levels.len(), 200);
    }

    #[test]
    fn test_add_rejects_out_of_range() {
        let mut levels = DecimationLevels::with_defaults();
        for bad in [0.0, -0.5, 1.5, f32::NAN] {
            assert!(matches!(levels.add(bad), Err(Error::InvalidArgument(_))));
        }
        assert_eq!(levels.len(), 4);
    }

    #[test]
    fn test_remove_then_add() {
        let mut levels = DecimationLevels::from_ratios([1.0, 0.5]).unwrap();
        let removed = levels.remove(0).unwrap();
        assert_eq!(removed.ratio(), 1.0);
        assert_eq!(levels.ratios(), vec![0.5]);
        levels.add(0.8).unwrap();
        assert_eq!(levels.ratios(), vec![0.8, 0.5]);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut levels = DecimationLevels::with_defaults();
        let err = levels.remove(4).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfRange { index: 4, len: 4 }));
        assert_eq!(levels.len(), 4);
    }

    #[test]
    fn test_remove_does_not_resort() {
        let mut levels = DecimationLevels::with_defaults();
        levels.set_ratio(1, 0.05).unwrap();
        levels.remove(0).unwrap();
        assert_eq!(levels.ratios(), vec![0.05, 0.2, 0.1]);
        levels.reorder();
        assert_eq!(levels.ratios(), vec![0.2, 0.1, 0.05]);
    }

    #[test]
    fn test_equal_ratios_keep_insertion_order() {
        let mut levels = DecimationLevels::from_ratios([0.5]).unwrap();
        levels.set_ratio(0, 0.4).unwrap();
        levels.add(0.4).unwrap();
        levels.set_ratio(1, 0.4).unwrap();
        assert_eq!(levels.ratios(), vec![0.4, 0.4]);
        assert!(levels.is_sorted());
    }

    #[test]
    fn test_labels() {
        let levels = DecimationLevels::with_defaults();
        assert_eq!(
            levels.labels(),
            vec![
                "LOD_0 Full Detail".to_string(),
                "LOD_1 (50.00%)".to_string(),
                "LOD_2 (20.00%)".to_string(),
                "LOD_3 (10.00%)".to_string(),
            ]
        );
    }

    #[test]
    fn test_deserialize_validates() {
        #[derive(Deserialize)]
        struct Wrapper {
            ratios: DecimationLevels,
        }
        let ok: Wrapper = toml::from_str("ratios = [0.25, 1.0]").unwrap();
        assert_eq!(ok.ratios.ratios(), vec![1.0, 0.25]);
        assert!(toml::from_str::<Wrapper>("ratios = [2.0]").is_err());
        assert!(toml::from_str::<Wrapper>("ratios = [0.5, 0.0]").is_err());
    }

    #[test]
    fn test_deserialize_sorts() {
        #[derive(Deserialize)]
        struct Wrapper {
            ratios: DecimationLevels,
        }
        let loaded: Wrapper = toml::from_str("ratios = [0.1, 1.0, 0.5]").unwrap();
        assert!(loaded.ratios.is_sorted());
        assert_eq!(loaded.ratios.ratios(), vec![1.0, 0.5, 0.1]);
    }
}
