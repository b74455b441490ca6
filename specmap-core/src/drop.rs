//! Drop target classification.
//!
//! A file dropped on the window lands either in the upper half (spectral map)
//! or the lower half (reference spectrum). Desktop platforms disagree on how
//! drop coordinates relate to the canvas geometry, so the canvas scale and the
//! dividing threshold are configured per platform family.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where a dropped file should be routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Load the file as a new spectral map.
    MapData,
    /// Load the file as the reference spectrum.
    Reference,
}

/// Platform families with distinct drop-coordinate behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PlatformFamily {
    /// Linux, macOS and other unix-likes.
    Posix,
    /// Everything else (Windows).
    Other,
}

impl PlatformFamily {
    /// Family of the platform this binary was compiled for.
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(unix) {
            Self::Posix
        } else {
            Self::Other
        }
    }
}

/// Canvas scale factor on POSIX platforms.
pub const POSIX_CANVAS_SCALE: f64 = 0.5;
/// Dividing threshold on POSIX platforms.
pub const POSIX_DROP_THRESHOLD: f64 = 1.0;
/// Canvas scale factor on other platforms.
pub const DEFAULT_CANVAS_SCALE: f64 = 1.0;
/// Dividing threshold on other platforms.
pub const DEFAULT_DROP_THRESHOLD: f64 = 0.5;

/// Geometry used to turn a drop y coordinate into a relative position.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DropGeometry {
    /// Window-chrome offset between the window origin and the canvas top, in pixels.
    pub chrome_offset: f64,
    /// Nominal canvas height in pixels before scaling.
    pub canvas_height: f64,
    /// Scale applied to `canvas_height`.
    pub scale: f64,
    /// Relative positions above this value classify as reference drops.
    pub threshold: f64,
}

impl DropGeometry {
    /// Default geometry for a platform family.
    #[must_use]
    pub const fn for_platform(family: PlatformFamily) -> Self {
        let (scale, threshold) = match family {
            PlatformFamily::Posix => (POSIX_CANVAS_SCALE, POSIX_DROP_THRESHOLD),
            PlatformFamily::Other => (DEFAULT_CANVAS_SCALE, DEFAULT_DROP_THRESHOLD),
        };
        Self {
            chrome_offset: 30.0,
            canvas_height: 400.0,
            scale,
            threshold,
        }
    }

    /// Same scale and threshold, with offset and height taken from a live layout.
    #[must_use]
    pub fn with_canvas(self, chrome_offset: f64, canvas_height: f64) -> Self {
        Self {
            chrome_offset,
            canvas_height,
            ..self
        }
    }

    /// Relative vertical position of a drop point.
    #[must_use]
    pub fn relative_position(&self, drop_y: f64, window_top: f64) -> f64 {
        let unit = self.canvas_height * self.scale;
        if unit <= 0.0 {
            return 0.0;
        }
        (drop_y - window_top - self.chrome_offset) / unit
    }

    /// Classify a drop by its absolute y coordinate and the window's top edge.
    #[must_use]
    pub fn classify(&self, drop_y: f64, window_top: f64) -> DropTarget {
        classify_relative(self.relative_position(drop_y, window_top), self.threshold)
    }
}

impl Default for DropGeometry {
    fn default() -> Self {
        Self::for_platform(PlatformFamily::current())
    }
}

/// Classify an already-normalized drop position.
#[must_use]
pub fn classify_relative(relative: f64, threshold: f64) -> DropTarget {
    if relative > threshold {
        DropTarget::Reference
    } else {
        DropTarget::MapData
    }
}
