//! Display settings shared with the plot renderer.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::spectrum::SpectralMap;

/// Named color maps for the 2D map image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Colormap {
    Autumn,
    Binary,
    Bone,
    Cool,
    Copper,
    Gray,
    #[default]
    Hot,
    Inferno,
    Jet,
    Magma,
    Plasma,
    Spring,
    Summer,
    Viridis,
    Winter,
}

impl Colormap {
    /// Every color map, sorted by name.
    pub const ALL: [Colormap; 15] = [
        Colormap::Autumn,
        Colormap::Binary,
        Colormap::Bone,
        Colormap::Cool,
        Colormap::Copper,
        Colormap::Gray,
        Colormap::Hot,
        Colormap::Inferno,
        Colormap::Jet,
        Colormap::Magma,
        Colormap::Plasma,
        Colormap::Spring,
        Colormap::Summer,
        Colormap::Viridis,
        Colormap::Winter,
    ];

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Colormap::Autumn => "autumn",
            Colormap::Binary => "binary",
            Colormap::Bone => "bone",
            Colormap::Cool => "cool",
            Colormap::Copper => "copper",
            Colormap::Gray => "gray",
            Colormap::Hot => "hot",
            Colormap::Inferno => "inferno",
            Colormap::Jet => "jet",
            Colormap::Magma => "magma",
            Colormap::Plasma => "plasma",
            Colormap::Spring => "spring",
            Colormap::Summer => "summer",
            Colormap::Viridis => "viridis",
            Colormap::Winter => "winter",
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Colormap::ALL
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::Config(format!("unknown colormap: {s}")))
    }
}

/// Intensity range mapped onto the color map.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColorRange {
    pub min: f64,
    pub max: f64,
}

impl ColorRange {
    /// Rounded minimum and maximum of a map.
    #[must_use]
    pub fn of_map(map: &SpectralMap) -> Self {
        let (min, max) = map.value_range();
        Self {
            min: min.round(),
            max: max.round(),
        }
    }

    /// Position of `value` inside the range, clamped to `[0, 1]`.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON || !span.is_finite() {
            return if value > self.min { 1.0 } else { 0.0 };
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

impl Default for ColorRange {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 2000.0,
        }
    }
}

/// User-controlled display options.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplaySettings {
    pub color_range: ColorRange,
    pub colormap: Colormap,
    /// Re-fit the 1D plot limits on every row change.
    pub autoscale: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            color_range: ColorRange::default(),
            colormap: Colormap::Hot,
            autoscale: true,
        }
    }
}
