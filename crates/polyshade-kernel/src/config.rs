//! Analysis configuration.
//!
//! The light direction and the acceptance thresholds are plain values
//! handed to [`crate::Model`] at construction. They can be loaded from a
//! TOML file; every field has a default:
//!
//! ```toml
//! light = [0.0, 0.0, 1.0]
//!
//! [acceptance]
//! center_min = 1.0
//! center_max = 3.0
//! angle_limit_rad = 0.4487989505128276
//! ```

use std::path::Path;

use polyshade_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShadeError};

/// Thresholds for the edge acceptance predicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Acceptance {
    /// Exclusive lower bound on the un-rotated midpoint x / scale.
    pub center_min: f64,
    /// Exclusive upper bound on the un-rotated midpoint x / scale.
    pub center_max: f64,
    /// Edges steeper than this angle (radians) are rejected.
    pub angle_limit_rad: f64,
}

impl Default for Acceptance {
    fn default() -> Self {
        Self {
            center_min: 1.0,
            center_max: 3.0,
            angle_limit_rad: std::f64::consts::PI / 7.0,
        }
    }
}

/// Everything the occlusion pass needs besides the geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Projection direction.
    pub light: [f64; 3],
    /// Acceptance predicate thresholds.
    pub acceptance: Acceptance,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            light: [0.0, 0.0, 1.0],
            acceptance: Acceptance::default(),
        }
    }
}

impl AnalysisConfig {
    /// Parse and validate a TOML config.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Light direction as a vector.
    pub fn light_vector(&self) -> Vec3 {
        Vec3::from(self.light)
    }

    /// Reject values the analysis cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.light.iter().any(|c| !c.is_finite()) {
            return Err(ShadeError::InvalidConfig("light must be finite".into()));
        }
        if self.light_vector() == Vec3::zeros() {
            return Err(ShadeError::InvalidConfig("light must be non-zero".into()));
        }
        let a = &self.acceptance;
        if a.center_min >= a.center_max {
            return Err(ShadeError::InvalidConfig(format!(
                "center_min ({}) must be below center_max ({})",
                a.center_min, a.center_max
            )));
        }
        if !a.angle_limit_rad.is_finite() {
            return Err(ShadeError::InvalidConfig(
                "angle_limit_rad must be finite".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = AnalysisConfig::default();
        assert_eq!(c.light_vector(), Vec3::z());
        assert_eq!(c.acceptance.center_min, 1.0);
        assert_eq!(c.acceptance.center_max, 3.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let c = AnalysisConfig::from_toml_str("").unwrap();
        assert_eq!(c, AnalysisConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let c = AnalysisConfig::from_toml_str(
            r#"
            [acceptance]
            center_max = 4.5
            "#,
        )
        .unwrap();
        assert_eq!(c.acceptance.center_max, 4.5);
        assert_eq!(c.acceptance.center_min, 1.0);
        assert_eq!(c.light, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_zero_light_rejected() {
        let err = AnalysisConfig::from_toml_str("light = [0.0, 0.0, 0.0]").unwrap_err();
        assert!(matches!(err, ShadeError::InvalidConfig(_)));
    }

    #[test]
    fn test_empty_slab_rejected() {
        let err = AnalysisConfig::from_toml_str(
            "[acceptance]\ncenter_min = 3.0\ncenter_max = 3.0\n",
        )
        .unwrap_err();
        assert!(matches!(err, ShadeError::InvalidConfig(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = AnalysisConfig::from_toml_str("light = \"down\"").unwrap_err();
        assert!(matches!(err, ShadeError::Toml(_)));
    }
}
