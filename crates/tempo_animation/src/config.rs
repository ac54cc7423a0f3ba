//! Animation preset configuration
//!
//! Named spring and timing-curve presets, loaded from TOML:
//!
//! ```toml
//! [springs.button]
//! tension = 400.0      # `stiffness` is accepted too
//! damping = 30.0
//! mass = 1.0           # optional
//! threshold = 0.01     # optional
//!
//! [curves]
//! standard = [0.4, 0.0, 0.2, 1.0]
//! enter = "ease-out"
//! ```
//!
//! Presets are validated when loaded. The animation types themselves accept
//! any numbers; this is the only place out-of-range parameters are rejected.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::bezier::UnitBezier;
use crate::error::ConfigError;
use crate::spring::SpringConfig;

/// A timing curve preset: a CSS keyword or four control points
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurveConfig {
    Named(String),
    ControlPoints([f64; 4]),
}

impl CurveConfig {
    /// Resolve to a curve, or `None` for an unknown keyword
    pub fn to_bezier(&self) -> Option<UnitBezier> {
        match self {
            CurveConfig::Named(name) => UnitBezier::from_name(name),
            CurveConfig::ControlPoints(points) => Some(UnitBezier::from(*points)),
        }
    }
}

impl From<UnitBezier> for CurveConfig {
    fn from(curve: UnitBezier) -> Self {
        CurveConfig::ControlPoints(curve.into())
    }
}

/// Named animation presets
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    #[serde(default)]
    pub springs: IndexMap<String, SpringConfig>,
    #[serde(default)]
    pub curves: IndexMap<String, CurveConfig>,
}

impl AnimationConfig {
    /// The built-in spring presets and CSS timing curves
    pub fn builtin() -> Self {
        let springs = [
            ("gentle", SpringConfig::gentle()),
            ("wobbly", SpringConfig::wobbly()),
            ("stiff", SpringConfig::stiff()),
            ("snappy", SpringConfig::snappy()),
            ("molasses", SpringConfig::molasses()),
        ]
        .into_iter()
        .map(|(name, config)| (name.to_string(), config))
        .collect();

        let curves = ["linear", "ease", "ease-in", "ease-out", "ease-in-out"]
            .into_iter()
            .map(|name| (name.to_string(), CurveConfig::Named(name.to_string())))
            .collect();

        Self { springs, curves }
    }

    /// Parse and validate a TOML preset document
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        tracing::debug!(
            springs = config.springs.len(),
            curves = config.curves.len(),
            "loaded animation presets"
        );
        Ok(config)
    }

    /// Serialize to TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Check every preset
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, spring) in &self.springs {
            validate_spring(name, spring)?;
        }
        for (key, curve) in &self.curves {
            if let CurveConfig::Named(name) = curve {
                if UnitBezier::from_name(name).is_none() {
                    return Err(ConfigError::UnknownCurve {
                        key: key.clone(),
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn spring(&self, name: &str) -> Option<SpringConfig> {
        self.springs.get(name).copied()
    }

    pub fn curve(&self, name: &str) -> Option<UnitBezier> {
        self.curves.get(name).and_then(CurveConfig::to_bezier)
    }

    /// Add presets from `other`, replacing entries with the same name
    pub fn merge(&mut self, other: AnimationConfig) {
        self.springs.extend(other.springs);
        self.curves.extend(other.curves);
    }
}

fn validate_spring(name: &str, spring: &SpringConfig) -> Result<(), ConfigError> {
    let reason = if !(spring.tension.is_finite() && spring.tension > 0.0) {
        Some("tension must be positive and finite")
    } else if !(spring.mass.is_finite() && spring.mass > 0.0) {
        Some("mass must be positive and finite")
    } else if !(spring.damping.is_finite() && spring.damping >= 0.0) {
        Some("damping must be non-negative and finite")
    } else if !(spring.threshold.is_finite() && spring.threshold > 0.0) {
        Some("threshold must be positive and finite")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ConfigError::InvalidSpring {
            name: name.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
