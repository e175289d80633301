//! Configuration loading for the utility engine.
//!
//! Engine settings and named curve definitions are loaded from a TOML file.
//! Curves defined here are the parameter tuples produced by authoring tools;
//! they shadow built-in presets of the same name.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use crate::curve::ResponseCurve;
use crate::selector::DEFAULT_MOMENTUM_BONUS;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Selection settings
    #[serde(default)]
    pub selector: SelectorConfig,
    /// Named response curves
    #[serde(default)]
    pub curves: BTreeMap<String, ResponseCurve>,
}

impl EngineConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_str(&content)?;
        tracing::info!(
            path = %path.display(),
            curves = config.curves.len(),
            "loaded engine config"
        );
        Ok(config)
    }

    /// Parses and validates configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty TOML.
    pub fn to_toml(&self) -> Result<String, TomlSerializeError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Checks values that deserialize fine but make no sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.selector.validate()
    }

    /// Resolves a curve by name: configured curves first, then built-in presets.
    pub fn curve(&self, name: &str) -> Result<ResponseCurve, ConfigError> {
        self.curves
            .get(name)
            .copied()
            .or_else(|| ResponseCurve::preset(name))
            .ok_or_else(|| ConfigError::UnknownCurve(name.to_string()))
    }
}

/// Selection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Bonus added to actions of the kind that won the previous tick
    pub momentum_bonus: f64,
}

impl SelectorConfig {
    /// The momentum bonus must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let bonus = self.momentum_bonus;
        if !bonus.is_finite() || bonus < 0.0 {
            return Err(ConfigError::InvalidMomentumBonus(bonus));
        }
        Ok(())
    }
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            momentum_bonus: DEFAULT_MOMENTUM_BONUS,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown curve '{0}'")]
    UnknownCurve(String),

    #[error("momentum_bonus must be finite and non-negative, got {0}")]
    InvalidMomentumBonus(f64),
}

/// Error that can occur during TOML serialization.
#[derive(Debug, Error)]
#[error("TOML serialize error: {0}")]
pub struct TomlSerializeError(#[from] pub toml::ser::Error);

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Utility engine configuration

[selector]
# Added to every action of the kind that won the previous tick
momentum_bonus = 1.25

# Named curves. Built-in presets (linear, inverse_linear, logistic, bell, ...)
# are available without being listed here; entries below shadow them.
#
# type is one of: linear, polynomial, logistic, logit, normal, sine

[curves.hunger]
type = "polynomial"
slope = 1.0
exponent = 2.0
x_shift = 0.0
y_shift = 0.0

[curves.threat]
type = "logistic"
slope = 1.0
exponent = 1.5
x_shift = 0.1
y_shift = 0.0
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{presets, CurveType};
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.selector.momentum_bonus, 1.25);
        assert!(config.curves.is_empty());
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            [selector]
            momentum_bonus = 0.5

            [curves.fatigue]
            type = "sine"
            slope = -1.0
            exponent = 1.0
        "#;

        let config = EngineConfig::from_str(toml).unwrap();

        assert_eq!(config.selector.momentum_bonus, 0.5);
        let fatigue = config.curves.get("fatigue").unwrap();
        assert_eq!(fatigue.curve_type, CurveType::Sine);
        assert_eq!(fatigue.slope, -1.0);
        assert_eq!(fatigue.y_shift, 0.0);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = EngineConfig::from_str("").unwrap();
        assert_eq!(config.selector.momentum_bonus, 1.25);

        let config = EngineConfig::from_str("[selector]\n").unwrap();
        assert_eq!(config.selector.momentum_bonus, 1.25);
    }

    #[test]
    fn test_negative_momentum_rejected() {
        let err = EngineConfig::from_str("[selector]\nmomentum_bonus = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMomentumBonus(b) if b == -1.0));
    }

    #[test]
    fn test_non_finite_momentum_rejected() {
        let mut config = EngineConfig::default();
        config.selector.momentum_bonus = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_curve_type_rejected() {
        let toml = r#"
            [curves.broken]
            type = "cubic"
        "#;
        assert!(matches!(
            EngineConfig::from_str(toml),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_curve_lookup_prefers_config() {
        let toml = r#"
            [curves.linear]
            type = "linear"
            slope = 0.5
        "#;
        let config = EngineConfig::from_str(toml).unwrap();

        assert_eq!(config.curve("linear").unwrap().slope, 0.5);
        assert_eq!(config.curve("bell").unwrap(), presets::BELL);
        assert!(matches!(
            config.curve("missing"),
            Err(ConfigError::UnknownCurve(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_default_config_toml_parses() {
        let config = EngineConfig::from_str(&default_config_toml()).unwrap();

        assert_eq!(config.selector.momentum_bonus, 1.25);
        assert_eq!(config.curves.len(), 2);
        assert_eq!(
            config.curve("hunger").unwrap(),
            ResponseCurve::new(CurveType::Polynomial, 1.0, 2.0, 0.0, 0.0)
        );
    }

    #[test]
    fn test_config_to_toml_round_trip() {
        let config = EngineConfig::from_str(&default_config_toml()).unwrap();
        let toml = config.to_toml().unwrap();

        assert!(toml.contains("[selector]"));
        assert!(toml.contains("[curves.threat]"));
        assert_eq!(EngineConfig::from_str(&toml).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[selector]\nmomentum_bonus = 2.0").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.selector.momentum_bonus, 2.0);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = EngineConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
