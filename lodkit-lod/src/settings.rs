//! Tool settings stored as TOML

use crate::levels::{DecimationLevel, DEFAULT_DECIMATIONS};
use crate::session::DEFAULT_PENDING_RATIO;
use lodkit_core::{Error, Result};
use lodkit_slicing::SliceConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Persisted defaults for new sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LodSettings {
    /// Ratios seeded into an empty level list on first activation
    pub seed_ratios: Vec<f32>,
    pub pending_ratio: f32,
    pub slice: SliceConfig,
}

impl Default for LodSettings {
    fn default() -> Self {
        Self {
            seed_ratios: DEFAULT_DECIMATIONS.to_vec(),
            pending_ratio: DEFAULT_PENDING_RATIO,
            slice: SliceConfig::default(),
        }
    }
}

impl LodSettings {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: LodSettings = toml::from_str(content)
            .map_err(|e| Error::Config(format!("failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Settings from `path` if it exists, defaults otherwise
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize settings: {}", e)))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path.as_ref(), content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        for &ratio in &self.seed_ratios {
            DecimationLevel::new(ratio)?;
        }
        DecimationLevel::new(self.pending_ratio)?;
        self.slice.validate()
    }
}
