//! Engine configuration
//!
//! Optional TOML file for the knobs the engine exposes. Every field has a
//! default, so an empty file (or no file) gives the built-in behavior.
//!
//! ```toml
//! [normalize]
//! default_checked_scenes = ["construction", "wet-ground"]
//!
//! [anchors]
//! legacy_tolerance = 0.5
//! default_key = "chest"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::anchor::{AnchorKey, AnchorOptions, DEFAULT_ANCHOR_KEY, LEGACY_ANCHOR_TOLERANCE};
use crate::normalizer::scenes_from_codes;
use crate::taxonomy::UsageScene;
use crate::{Error, Result};

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub normalize: NormalizeConfig,

    #[serde(default)]
    pub anchors: AnchorConfig,
}

/// Task-card normalization settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct NormalizeConfig {
    /// Scene codes pre-checked when a card has no explicit `checked`
    #[serde(default)]
    pub default_checked_scenes: Vec<String>,
}

/// Anchor resolution and editing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Per-axis tolerance for matching legacy preset coordinates
    #[serde(default = "default_legacy_tolerance")]
    pub legacy_tolerance: f64,

    /// Key applied when enabling an anchor on an item without one
    #[serde(default = "default_anchor_key")]
    pub default_key: String,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        Self {
            legacy_tolerance: default_legacy_tolerance(),
            default_key: default_anchor_key(),
        }
    }
}

fn default_legacy_tolerance() -> f64 {
    LEGACY_ANCHOR_TOLERANCE
}

fn default_anchor_key() -> String {
    DEFAULT_ANCHOR_KEY.as_str().to_string()
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make anchor resolution ill-defined.
    ///
    /// Unknown default-checked scenes are not an error; they are dropped
    /// like any other untrusted scene code.
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.anchors.legacy_tolerance;
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(Error::Config(format!(
                "anchors.legacy_tolerance must be a finite, non-negative number, got {}",
                tolerance
            )));
        }
        if AnchorKey::from_code(&self.anchors.default_key).is_none() {
            return Err(Error::Config(format!(
                "anchors.default_key {:?} is not a known anchor key",
                self.anchors.default_key
            )));
        }
        Ok(())
    }

    /// Default-checked scenes, unknown codes removed
    pub fn default_checked_scenes(&self) -> Vec<UsageScene> {
        let codes = &self.normalize.default_checked_scenes;
        let scenes = scenes_from_codes(codes.as_slice());
        if scenes.len() != codes.len() {
            let unknown: Vec<&str> = codes
                .iter()
                .map(String::as_str)
                .filter(|c| UsageScene::from_code(c).is_none())
                .collect();
            tracing::warn!(?unknown, "ignoring unknown default-checked scenes");
        }
        scenes
    }

    /// Anchor options for the resolver and editor operations
    pub fn anchor_options(&self) -> AnchorOptions {
        AnchorOptions {
            legacy_tolerance: self.anchors.legacy_tolerance,
            default_key: AnchorKey::from_code(&self.anchors.default_key)
                .unwrap_or(DEFAULT_ANCHOR_KEY),
        }
    }
}
