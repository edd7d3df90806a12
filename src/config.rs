//! Configuration for the tag engine.

use crate::error::ConfigError;
use serde::Deserialize;

/// Configuration for the tag engine.
///
/// Every field has a default, so a partial TOML document only overrides
/// what it names.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    /// Base distance the proximity factors scale.
    pub view_distance: f64,
    /// Radius factor for operations that add visibility (spawn, insert).
    pub spawn_factor: f64,
    /// Radius factor for operations that remove visibility (destroy, removal).
    pub keep_factor: f64,
    /// Default visibility of newly created tags.
    pub default_visible: bool,
    /// Maximum display width of a line's text.
    pub max_line_width: Option<usize>,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            view_distance: 48.0,
            spawn_factor: 1.0,
            keep_factor: 1.1,
            default_visible: true,
            max_line_width: None,
        }
    }
}

impl TagConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or the values are
    /// inconsistent.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the proximity band is well-formed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.view_distance > 0.0) {
            return Err(ConfigError::Invalid {
                field: "view_distance",
                reason: "must be positive",
            });
        }
        if !(self.spawn_factor > 0.0) {
            return Err(ConfigError::Invalid {
                field: "spawn_factor",
                reason: "must be positive",
            });
        }
        if self.keep_factor < self.spawn_factor {
            return Err(ConfigError::Invalid {
                field: "keep_factor",
                reason: "must not be smaller than spawn_factor",
            });
        }
        Ok(())
    }

    /// Radius used to qualify viewers for spawns and inserts.
    pub fn spawn_radius(&self) -> f64 {
        self.view_distance * self.spawn_factor
    }

    /// Radius used to qualify viewers for keeping (or destroying) a tag.
    pub fn keep_radius(&self) -> f64 {
        self.view_distance * self.keep_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_band() {
        let config = TagConfig::default();
        assert!((config.spawn_radius() - 48.0).abs() < f64::EPSILON);
        assert!((config.keep_radius() - 52.8).abs() < 1e-9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = TagConfig::from_toml_str("view_distance = 32.0\nmax_line_width = 24\n").unwrap();
        assert!((config.view_distance - 32.0).abs() < f64::EPSILON);
        assert_eq!(config.max_line_width, Some(24));
        assert!(config.default_visible);
    }

    #[test]
    fn test_inverted_band_rejected() {
        let err = TagConfig::from_toml_str("spawn_factor = 1.2\nkeep_factor = 1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "keep_factor", .. }));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(matches!(
            TagConfig::from_toml_str("view_distance = \"far\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
