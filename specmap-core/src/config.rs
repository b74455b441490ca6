//! Session configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationDraft;
use crate::display::DisplaySettings;
use crate::drop::DropGeometry;
use crate::error::{Error, Result};

/// Center wavelengths offered in the UI, in nm.
pub const CENTER_PRESETS: [f64; 3] = [500.0, 630.0, 760.0];

/// Default half-width of the calibration peak search, in channels.
pub const DEFAULT_SEARCH_WIDTH: f64 = 10.0;

/// Initial calibration choices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalibrationDefaults {
    pub center: f64,
    pub search_width: f64,
    /// Engine defaults are used for any of these left unset.
    pub dimension: Option<u32>,
    pub material: Option<String>,
    pub function: Option<String>,
}

impl Default for CalibrationDefaults {
    fn default() -> Self {
        Self {
            center: CENTER_PRESETS[1],
            search_width: DEFAULT_SEARCH_WIDTH,
            dimension: None,
            material: None,
            function: None,
        }
    }
}

impl CalibrationDefaults {
    /// Draft seeded from these defaults.
    #[must_use]
    pub fn draft(&self) -> CalibrationDraft {
        CalibrationDraft {
            center: Some(self.center),
            dimension: self.dimension,
            material: self.material.clone(),
            function: self.function.clone(),
            search_width: Some(self.search_width),
        }
    }
}

/// Top-level configuration for a session.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub drop: DropGeometry,
    pub calibration: CalibrationDefaults,
    pub display: DisplaySettings,
}

impl SessionConfig {
    /// Reject values the session cannot work with.
    ///
    /// # Errors
    /// Returns [`Error::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if !is_positive(self.drop.canvas_height) || !is_positive(self.drop.scale) {
            return Err(Error::Config(
                "drop canvas height and scale must be positive".into(),
            ));
        }
        if !self.calibration.center.is_finite() {
            return Err(Error::Config("calibration center must be finite".into()));
        }
        if !is_positive(self.calibration.search_width) {
            return Err(Error::Config("search width must be positive".into()));
        }
        let range = self.display.color_range;
        if !(range.min.is_finite() && range.max.is_finite()) {
            return Err(Error::Config("color range must be finite".into()));
        }
        Ok(())
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SessionConfig::default();
        config.validate().unwrap();
        let draft = config.calibration.draft();
        assert_eq!(draft.center, Some(630.0));
        assert_eq!(draft.search_width, Some(DEFAULT_SEARCH_WIDTH));
        assert!(draft.material.is_none());
    }

    #[test]
    fn test_rejects_bad_search_width() {
        let mut config = SessionConfig::default();
        config.calibration.search_width = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
        config.calibration.search_width = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"calibration": {"center": 500.0}}"#).unwrap();
        assert!((config.calibration.center - 500.0).abs() < f64::EPSILON);
        assert!((config.calibration.search_width - DEFAULT_SEARCH_WIDTH).abs() < f64::EPSILON);
        assert_eq!(config.display, DisplaySettings::default());
    }
}
