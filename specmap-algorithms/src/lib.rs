//! specmap-algorithms: wavelength calibration against lamp emission lines.
//!
//! This crate provides the built-in [`CalibrationEngine`] for specmap:
//! - **Line lists** - Ne, Ar, Hg, Kr and Xe air wavelengths
//! - **Peak search** - windowed maximum with Lorentzian, Gaussian or centroid refinement
//! - **Polynomial fit** - least squares from channel to wavelength, dimension 1 to 3
//!
#![warn(missing_docs)]

mod engine;
pub mod lines;
mod peaks;
mod polyfit;

pub use engine::{LampCalibrator, LampCalibratorConfig, DIMENSIONS};
pub use lines::{line_list, LineList, LINE_LISTS};
pub use peaks::{find_peak, PeakSearch, PeakShape};
pub use polyfit::{polyfit, Polynomial};

// Re-export the engine interface
pub use specmap_core::calibration::CalibrationEngine;
